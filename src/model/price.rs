use chrono::NaiveDate;

use crate::error::RiskError;

/// Dense date-by-asset table of positive prices, one row per trading day.
///
/// Rows are strictly increasing by date and gaps are assumed forward-filled
/// by the data supplier, so every cell is populated.
#[derive(Debug, Clone)]
pub struct PriceMatrix {
    dates: Vec<NaiveDate>,
    assets: Vec<String>,
    // Row-major: rows[day][asset].
    rows: Vec<Vec<f64>>,
}

impl PriceMatrix {
    /// Build a validated price matrix.
    ///
    /// Fails with [`RiskError::Data`] on duplicate assets, non-increasing
    /// dates, ragged rows, or non-positive/non-finite prices.
    pub fn new(
        dates: Vec<NaiveDate>,
        assets: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, RiskError> {
        if dates.len() != rows.len() {
            return Err(RiskError::Data(format!(
                "{} dates but {} price rows",
                dates.len(),
                rows.len()
            )));
        }
        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].contains(asset) {
                return Err(RiskError::Data(format!("duplicate asset '{}'", asset)));
            }
        }
        for pair in dates.windows(2) {
            if pair[1] <= pair[0] {
                return Err(RiskError::Data(format!(
                    "dates must be strictly increasing: {} then {}",
                    pair[0], pair[1]
                )));
            }
        }
        for (day, row) in rows.iter().enumerate() {
            if row.len() != assets.len() {
                return Err(RiskError::Data(format!(
                    "row {} has {} cells, expected {}",
                    day,
                    row.len(),
                    assets.len()
                )));
            }
            for (col, &px) in row.iter().enumerate() {
                if !px.is_finite() || px <= 0.0 {
                    return Err(RiskError::Data(format!(
                        "non-positive price {} for '{}' on {}",
                        px, assets[col], dates[day]
                    )));
                }
            }
        }
        Ok(Self {
            dates,
            assets,
            rows,
        })
    }

    pub fn n_days(&self) -> usize {
        self.dates.len()
    }

    pub fn n_assets(&self) -> usize {
        self.assets.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Price of the asset at column `asset` on row `day`.
    pub fn price(&self, day: usize, asset: usize) -> f64 {
        self.rows[day][asset]
    }

    /// Latest price row, if any.
    pub fn latest_row(&self) -> Option<(&NaiveDate, &[f64])> {
        match (self.dates.last(), self.rows.last()) {
            (Some(date), Some(row)) => Some((date, row.as_slice())),
            _ => None,
        }
    }
}
