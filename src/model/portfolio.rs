use std::collections::HashMap;

use serde::Deserialize;

use crate::error::RiskError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Static portfolio weights, keyed by asset identifier.
///
/// An asset absent from the map carries weight exactly 0.0; lookups never
/// fail. Weights are treated as fixed for the whole history (no rebalancing).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Weights {
    by_asset: HashMap<String, f64>,
}

impl Weights {
    pub fn new(by_asset: HashMap<String, f64>) -> Self {
        Self { by_asset }
    }

    /// Weight of `asset`, 0.0 when the asset is not in the portfolio.
    pub fn get(&self, asset: &str) -> f64 {
        self.by_asset.get(asset).copied().unwrap_or(0.0)
    }

    /// Check the weights are non-negative and sum to 1 within tolerance.
    pub fn validate(&self) -> Result<(), RiskError> {
        for (asset, &w) in &self.by_asset {
            if !w.is_finite() || w < 0.0 {
                return Err(RiskError::Data(format!(
                    "weight for '{}' must be a non-negative number, got {}",
                    asset, w
                )));
            }
        }
        let sum: f64 = self.by_asset.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RiskError::Data(format!(
                "weights must sum to 1.0, got {:.8}",
                sum
            )));
        }
        Ok(())
    }

    /// Derive normalized USD weights from raw positions.
    ///
    /// `quantities` holds shares/contracts per asset, `currencies` the
    /// quote currency of each asset (assets absent from it are USD), and
    /// `fx_to_usd` the conversion rate per non-USD currency. Position value
    /// is quantity x latest price x FX; weights are position value over NAV.
    pub fn from_positions(
        quantities: &HashMap<String, f64>,
        currencies: &HashMap<String, String>,
        fx_to_usd: &HashMap<String, f64>,
        latest_prices: &HashMap<String, f64>,
    ) -> Result<Self, RiskError> {
        let mut position_value = HashMap::new();
        for (asset, &qty) in quantities {
            let price = latest_prices.get(asset).copied().ok_or_else(|| {
                RiskError::Data(format!("no latest price for position '{}'", asset))
            })?;
            if !price.is_finite() || price <= 0.0 {
                return Err(RiskError::Data(format!(
                    "non-positive latest price {} for '{}'",
                    price, asset
                )));
            }
            let fx = match currencies.get(asset).map(String::as_str) {
                None | Some("USD") => 1.0,
                Some(ccy) => fx_to_usd.get(ccy).copied().ok_or_else(|| {
                    RiskError::Data(format!("no FX rate for currency '{}'", ccy))
                })?,
            };
            position_value.insert(asset.clone(), qty * price * fx);
        }

        let nav: f64 = position_value.values().sum();
        if !(nav > 0.0) {
            return Err(RiskError::Data(format!(
                "portfolio NAV must be positive, got {}",
                nav
            )));
        }
        let by_asset = position_value
            .into_iter()
            .map(|(asset, value)| (asset, value / nav))
            .collect();
        Ok(Self { by_asset })
    }
}
