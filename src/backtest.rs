use serde::Serialize;

use crate::config::RiskConfig;
use crate::estimator::RiskEstimate;

/// Basel-style three-zone classification of a rolling breach count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrafficLight {
    Green,
    Amber,
    Red,
}

impl TrafficLight {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Amber => "Amber",
            Self::Red => "Red",
        }
    }
}

/// Map a rolling breach count to its traffic-light zone: up to 4 breaches is
/// Green, 5 to 9 Amber, 10 or more Red.
pub fn classify(count: u32) -> TrafficLight {
    match count {
        0..=4 => TrafficLight::Green,
        5..=9 => TrafficLight::Amber,
        _ => TrafficLight::Red,
    }
}

/// Which of the two parallel models a figure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelKind {
    Hs,
    Fhs,
}

impl ModelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hs => "HS",
            Self::Fhs => "FHS",
        }
    }
}

/// One day's breach flags and, once enough observations exist, the rolling
/// breach counts over the trailing backtest window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreachRecord {
    pub breach_hs: bool,
    pub breach_fhs: bool,
    pub n_breach_hs: Option<u32>,
    pub n_breach_fhs: Option<u32>,
}

/// Flags days whose realized return breaches the day's predicted VaR and
/// maintains rolling breach counts.
///
/// The VaR for day `t` is computed from data strictly before `t`, so the
/// same-day comparison `return[t] < var[t]` is an out-of-sample check. The
/// comparison is strict: a return exactly equal to the VaR is not a breach.
#[derive(Debug, Clone)]
pub struct BreachTracker {
    backtest_window: usize,
}

impl BreachTracker {
    pub fn new(cfg: &RiskConfig) -> Self {
        Self {
            backtest_window: cfg.backtest_window,
        }
    }

    /// Produce a breach record for every day with a defined risk estimate.
    ///
    /// The result is aligned with `returns`. Rolling counts stay `None`
    /// until `backtest_window` breach observations have accumulated.
    pub fn track(
        &self,
        returns: &[f64],
        estimates: &[Option<RiskEstimate>],
    ) -> Vec<Option<BreachRecord>> {
        let mut out = vec![None; returns.len()];

        // Sliding counts over the observed breach flags, SMA-style: add the
        // newest flag, evict the one falling out of the window.
        let mut hs_flags: Vec<bool> = Vec::new();
        let mut fhs_flags: Vec<bool> = Vec::new();
        let mut hs_count = 0u32;
        let mut fhs_count = 0u32;

        for (t, estimate) in estimates.iter().enumerate() {
            let Some(e) = estimate else { continue };

            let breach_hs = returns[t] < e.hs_var;
            let breach_fhs = returns[t] < e.fhs_var;

            hs_count += breach_hs as u32;
            fhs_count += breach_fhs as u32;
            hs_flags.push(breach_hs);
            fhs_flags.push(breach_fhs);
            if hs_flags.len() > self.backtest_window {
                let evict = hs_flags.len() - self.backtest_window - 1;
                hs_count -= hs_flags[evict] as u32;
                fhs_count -= fhs_flags[evict] as u32;
            }

            let full = hs_flags.len() >= self.backtest_window;
            out[t] = Some(BreachRecord {
                breach_hs,
                breach_fhs,
                n_breach_hs: full.then_some(hs_count),
                n_breach_fhs: full.then_some(fhs_count),
            });
        }
        out
    }
}
