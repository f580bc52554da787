use chrono::NaiveDate;

use crate::error::RiskError;
use crate::model::portfolio::Weights;
use crate::model::price::PriceMatrix;

/// Daily simple returns derived from a price matrix, one entry per day after
/// the first, plus the weighted portfolio return series.
#[derive(Debug, Clone)]
pub struct PortfolioReturns {
    dates: Vec<NaiveDate>,
    // Row-major: by_asset[day][asset], aligned with `dates`.
    by_asset: Vec<Vec<f64>>,
    portfolio: Vec<f64>,
}

impl PortfolioReturns {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn asset_returns(&self, day: usize) -> &[f64] {
        &self.by_asset[day]
    }

    /// Portfolio return per day, weighted sum of same-day asset returns.
    pub fn portfolio(&self) -> &[f64] {
        &self.portfolio
    }

    pub fn len(&self) -> usize {
        self.portfolio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty()
    }
}

/// Builds per-asset and portfolio return series from aligned price history
/// and a static weight vector.
#[derive(Debug, Clone)]
pub struct ReturnSeriesBuilder;

impl ReturnSeriesBuilder {
    /// Compute `price[t]/price[t-1] - 1` per asset and the weighted
    /// portfolio return per day. The first price row produces no return.
    ///
    /// Fails with [`RiskError::Data`] when fewer than two price rows exist.
    /// Assets without a weight contribute zero to the portfolio return.
    pub fn build(prices: &PriceMatrix, weights: &Weights) -> Result<PortfolioReturns, RiskError> {
        if prices.n_days() < 2 {
            return Err(RiskError::Data(format!(
                "need at least 2 price rows to compute returns, got {}",
                prices.n_days()
            )));
        }
        weights.validate()?;

        let weight_vector: Vec<f64> = prices.assets().iter().map(|a| weights.get(a)).collect();

        let n = prices.n_days() - 1;
        let mut dates = Vec::with_capacity(n);
        let mut by_asset = Vec::with_capacity(n);
        let mut portfolio = Vec::with_capacity(n);
        for day in 1..prices.n_days() {
            let mut row = Vec::with_capacity(prices.n_assets());
            let mut port = 0.0;
            for asset in 0..prices.n_assets() {
                let ret = prices.price(day, asset) / prices.price(day - 1, asset) - 1.0;
                port += weight_vector[asset] * ret;
                row.push(ret);
            }
            dates.push(prices.dates()[day]);
            by_asset.push(row);
            portfolio.push(port);
        }

        Ok(PortfolioReturns {
            dates,
            by_asset,
            portfolio,
        })
    }
}
