use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::backtest::{classify, BreachRecord, ModelKind, TrafficLight};
use crate::error::RiskError;
use crate::estimator::RiskEstimate;

/// One fully defined day of the output table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskRow {
    pub date: NaiveDate,
    pub portfolio_return: f64,
    pub hs_var: f64,
    pub fhs_var: f64,
    pub hs_es: f64,
    pub fhs_es: f64,
    pub breach_hs: bool,
    pub breach_fhs: bool,
    pub n_breach_hs: u32,
    pub n_breach_fhs: u32,
}

/// Latest-day backtest standing of one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BacktestSnapshot {
    pub model: ModelKind,
    pub breach_count: u32,
    pub traffic_light: TrafficLight,
}

/// Per-day risk table plus the most recent backtest snapshots, packaged for
/// external consumers (CSV, workbook writers).
#[derive(Debug, Clone, Default)]
pub struct RiskReport {
    pub rows: Vec<RiskRow>,
    /// HS and FHS snapshots for the most recent fully defined day; empty
    /// when no day has a complete set of rolling counts yet.
    pub snapshots: Vec<BacktestSnapshot>,
}

impl RiskReport {
    /// Join the per-day series into rows, keeping only days where every
    /// column is defined, and derive the latest snapshots.
    pub fn assemble(
        dates: &[NaiveDate],
        portfolio: &[f64],
        estimates: &[Option<RiskEstimate>],
        breaches: &[Option<BreachRecord>],
    ) -> Self {
        let mut rows = Vec::new();
        for t in 0..portfolio.len() {
            let (Some(e), Some(b)) = (&estimates[t], &breaches[t]) else {
                continue;
            };
            let (Some(n_hs), Some(n_fhs)) = (b.n_breach_hs, b.n_breach_fhs) else {
                continue;
            };
            rows.push(RiskRow {
                date: dates[t],
                portfolio_return: portfolio[t],
                hs_var: e.hs_var,
                fhs_var: e.fhs_var,
                hs_es: e.hs_es,
                fhs_es: e.fhs_es,
                breach_hs: b.breach_hs,
                breach_fhs: b.breach_fhs,
                n_breach_hs: n_hs,
                n_breach_fhs: n_fhs,
            });
        }

        let snapshots = rows
            .last()
            .map(|latest| {
                vec![
                    BacktestSnapshot {
                        model: ModelKind::Hs,
                        breach_count: latest.n_breach_hs,
                        traffic_light: classify(latest.n_breach_hs),
                    },
                    BacktestSnapshot {
                        model: ModelKind::Fhs,
                        breach_count: latest.n_breach_fhs,
                        traffic_light: classify(latest.n_breach_fhs),
                    },
                ]
            })
            .unwrap_or_default();

        Self { rows, snapshots }
    }

    /// Render the per-day table as CSV with a header row. Breach flags are
    /// written as 0/1.
    pub fn write_csv<W: Write>(&self, mut w: W) -> Result<(), RiskError> {
        writeln!(
            w,
            "date,portfolio_return,hs_var,fhs_var,hs_es,fhs_es,\
             breach_hs,breach_fhs,n_breach_hs,n_breach_fhs"
        )?;
        for row in &self.rows {
            writeln!(
                w,
                "{},{},{},{},{},{},{},{},{},{}",
                row.date,
                row.portfolio_return,
                row.hs_var,
                row.fhs_var,
                row.hs_es,
                row.fhs_es,
                row.breach_hs as u8,
                row.breach_fhs as u8,
                row.n_breach_hs,
                row.n_breach_fhs
            )?;
        }
        Ok(())
    }
}
