use tracing::{debug, info};

use crate::backtest::BreachTracker;
use crate::config::RiskConfig;
use crate::error::RiskError;
use crate::estimator::RollingRiskEstimator;
use crate::model::portfolio::Weights;
use crate::model::price::PriceMatrix;
use crate::report::RiskReport;
use crate::returns::ReturnSeriesBuilder;
use crate::volatility::EwmaVolatilityFilter;

/// End-to-end tail-risk pipeline over an in-memory price history.
///
/// Stages run strictly in order: returns, EWMA volatility, rolling HS/FHS
/// VaR/ES, breach flags and counts, report assembly. Every stage consumes
/// only the previous stage's output, so a run is deterministic and two runs
/// on identical inputs are bit-identical.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    cfg: RiskConfig,
}

impl RiskEngine {
    pub fn new(cfg: RiskConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.cfg
    }

    /// Run the full pipeline.
    ///
    /// Days without enough trailing history are excluded from the report
    /// rather than failing the run; malformed input and degenerate
    /// volatility abort it.
    pub fn run(&self, prices: &PriceMatrix, weights: &Weights) -> Result<RiskReport, RiskError> {
        info!(
            days = prices.n_days(),
            assets = prices.n_assets(),
            lookback = self.cfg.lookback,
            alpha = self.cfg.alpha,
            "running tail-risk pipeline"
        );

        let returns = ReturnSeriesBuilder::build(prices, weights)?;
        debug!(returns = returns.len(), "portfolio return series built");

        let sigma = EwmaVolatilityFilter::new(&self.cfg).filter(returns.portfolio())?;

        let estimates =
            RollingRiskEstimator::new(&self.cfg).estimate(returns.portfolio(), &sigma)?;
        debug!(
            defined = estimates.iter().filter(|e| e.is_some()).count(),
            "rolling VaR/ES estimates computed"
        );

        let breaches = BreachTracker::new(&self.cfg).track(returns.portfolio(), &estimates);

        let report = RiskReport::assemble(
            returns.dates(),
            returns.portfolio(),
            &estimates,
            &breaches,
        );
        info!(
            rows = report.rows.len(),
            snapshots = report.snapshots.len(),
            "report assembled"
        );
        Ok(report)
    }
}
