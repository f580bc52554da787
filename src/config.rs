use anyhow::{bail, Result};
use serde::Deserialize;

/// Parameters of the tail-risk engine.
///
/// A `RiskConfig` is passed by value into each component at construction, so
/// several parameterizations (e.g. alpha 0.95 vs 0.99) can run side by side
/// without interfering.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Trailing window length (days) for the rolling VaR/ES estimates.
    pub lookback: usize,
    /// Confidence level of the VaR/ES estimates.
    pub alpha: f64,
    /// EWMA decay factor (lambda) of the volatility filter.
    pub decay: f64,
    /// Number of leading returns used to seed the volatility recursion.
    pub seed_window: usize,
    /// Trailing window length (days) for the rolling breach counts.
    pub backtest_window: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            lookback: 250,
            alpha: 0.99,
            decay: 0.94,
            seed_window: 20,
            backtest_window: 250,
        }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> Result<()> {
        if self.lookback < 1 {
            bail!("lookback must be >= 1, got {}", self.lookback);
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            bail!("alpha must be in (0, 1), got {}", self.alpha);
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            bail!("decay must be in (0, 1), got {}", self.decay);
        }
        if self.seed_window < 2 {
            bail!("seed_window must be >= 2, got {}", self.seed_window);
        }
        if self.backtest_window < 1 {
            bail!("backtest_window must be >= 1, got {}", self.backtest_window);
        }
        Ok(())
    }
}
