use crate::config::RiskConfig;
use crate::error::RiskError;

/// One day's tail-risk estimates, all signed returns (negative = loss).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskEstimate {
    pub hs_var: f64,
    pub hs_es: f64,
    pub fhs_var: f64,
    pub fhs_es: f64,
}

/// Rolling historical-simulation and filtered-historical-simulation VaR/ES.
///
/// For each day `t` with `lookback` prior observations, estimates are drawn
/// from the trailing window `returns[t-lookback..t)`: plain empirical
/// quantile/tail-mean for HS, and the same applied to volatility-standardized
/// shocks rescaled by `sigma[t]` for FHS. The window never includes day `t`,
/// so every estimate is an out-of-sample prediction for its own day.
#[derive(Debug, Clone)]
pub struct RollingRiskEstimator {
    lookback: usize,
    alpha: f64,
}

impl RollingRiskEstimator {
    pub fn new(cfg: &RiskConfig) -> Self {
        Self {
            lookback: cfg.lookback,
            alpha: cfg.alpha,
        }
    }

    /// Estimate VaR/ES for every day of the series.
    ///
    /// The result is aligned with `returns`; entries before index `lookback`
    /// are `None` (undefined, not zero). Fails with
    /// [`RiskError::DegenerateVolatility`] if any in-window volatility is
    /// zero or non-finite where shocks must be standardized.
    pub fn estimate(
        &self,
        returns: &[f64],
        sigma: &[f64],
    ) -> Result<Vec<Option<RiskEstimate>>, RiskError> {
        if returns.len() != sigma.len() {
            return Err(RiskError::Data(format!(
                "{} returns but {} volatility values",
                returns.len(),
                sigma.len()
            )));
        }

        let q_level = 1.0 - self.alpha;
        let mut out = vec![None; returns.len()];
        for t in self.lookback..returns.len() {
            let window = &returns[t - self.lookback..t];

            let hs_var = empirical_quantile(window, q_level);
            let hs_es = tail_mean(window, hs_var);

            let mut shocks = Vec::with_capacity(window.len());
            for i in t - self.lookback..t {
                if !sigma[i].is_finite() || sigma[i] == 0.0 {
                    return Err(RiskError::DegenerateVolatility(i));
                }
                shocks.push(returns[i] / sigma[i]);
            }
            let z_q = empirical_quantile(&shocks, q_level);
            out[t] = Some(RiskEstimate {
                hs_var,
                hs_es,
                fhs_var: z_q * sigma[t],
                fhs_es: tail_mean(&shocks, z_q) * sigma[t],
            });
        }
        Ok(out)
    }
}

/// Linear-interpolation empirical quantile (the standard convention): rank
/// `h = (n-1) * q`, interpolated between the two adjacent order statistics.
fn empirical_quantile(values: &[f64], q: f64) -> f64 {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Mean of all values at or below the threshold. The interpolated quantile
/// is never below the window minimum, so the tail is never empty.
fn tail_mean(values: &[f64], threshold: f64) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in values {
        if v <= threshold {
            sum += v;
            count += 1;
        }
    }
    debug_assert!(count > 0);
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(lookback: usize, alpha: f64) -> RiskConfig {
        RiskConfig {
            lookback,
            alpha,
            ..RiskConfig::default()
        }
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let values = [4.0, 1.0, 3.0, 2.0];
        // Sorted: 1 2 3 4; h = 3 * 0.25 = 0.75 -> 1 + 0.75 * (2 - 1).
        assert!((empirical_quantile(&values, 0.25) - 1.75).abs() < 1e-12);
        assert!((empirical_quantile(&values, 0.0) - 1.0).abs() < 1e-12);
        assert!((empirical_quantile(&values, 1.0) - 4.0).abs() < 1e-12);
        assert!((empirical_quantile(&values, 0.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn tail_mean_includes_threshold_point() {
        let values = [-0.03, -0.01, 0.0, 0.02];
        let m = tail_mean(&values, -0.01);
        assert!((m - (-0.02)).abs() < 1e-12);
    }

    #[test]
    fn undefined_before_lookback() {
        let est = RollingRiskEstimator::new(&cfg(5, 0.99));
        let returns = vec![0.01; 8];
        let sigma = vec![0.01; 8];
        let out = est.estimate(&returns, &sigma).unwrap();
        assert_eq!(out.len(), 8);
        assert!(out[..5].iter().all(Option::is_none));
        assert!(out[5..].iter().all(Option::is_some));
    }

    #[test]
    fn hs_estimates_come_from_trailing_window_only() {
        let est = RollingRiskEstimator::new(&cfg(4, 0.75));
        // Window for t=4 is the first four returns; day 4's own return must
        // not influence its estimate.
        let returns = [-0.04, -0.02, 0.01, 0.03, -0.99];
        let sigma = [0.01; 5];
        let out = est.estimate(&returns, &sigma).unwrap();
        let e = out[4].unwrap();
        // Sorted window: -0.04 -0.02 0.01 0.03; q(0.25) = -0.025.
        assert!((e.hs_var - (-0.025)).abs() < 1e-12);
        // Tail at or below -0.025 is just -0.04.
        assert!((e.hs_es - (-0.04)).abs() < 1e-12);
    }

    #[test]
    fn fhs_rescales_shocks_by_todays_volatility() {
        let est = RollingRiskEstimator::new(&cfg(4, 0.75));
        let returns = [-0.04, -0.02, 0.01, 0.03, 0.0];
        // Constant window volatility 0.02, today's volatility 0.04: FHS
        // doubles the HS numbers computed at sigma 0.02.
        let sigma = [0.02, 0.02, 0.02, 0.02, 0.04];
        let out = est.estimate(&returns, &sigma).unwrap();
        let e = out[4].unwrap();
        assert!((e.fhs_var - 2.0 * (-0.025)).abs() < 1e-12);
        assert!((e.fhs_es - 2.0 * (-0.04)).abs() < 1e-12);
    }

    #[test]
    fn es_at_least_as_extreme_as_var() {
        let est = RollingRiskEstimator::new(&cfg(6, 0.9));
        let returns = [-0.05, 0.01, -0.02, 0.03, -0.01, 0.02, 0.0, -0.03];
        let sigma = [0.02; 8];
        let out = est.estimate(&returns, &sigma).unwrap();
        for e in out.iter().flatten() {
            assert!(e.hs_es <= e.hs_var);
            assert!(e.fhs_es <= e.fhs_var);
        }
    }

    #[test]
    fn zero_volatility_in_window_is_degenerate() {
        let est = RollingRiskEstimator::new(&cfg(3, 0.99));
        let returns = [0.0, 0.0, 0.0, 0.0];
        let sigma = [0.0, 0.0, 0.0, 0.0];
        let err = est.estimate(&returns, &sigma).unwrap_err();
        assert!(matches!(err, RiskError::DegenerateVolatility(0)));
    }

    #[test]
    fn non_finite_volatility_is_degenerate() {
        let est = RollingRiskEstimator::new(&cfg(3, 0.99));
        let returns = [0.01, -0.01, 0.02, 0.0];
        let sigma = [0.01, f64::NAN, 0.01, 0.01];
        let err = est.estimate(&returns, &sigma).unwrap_err();
        assert!(matches!(err, RiskError::DegenerateVolatility(1)));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let est = RollingRiskEstimator::new(&cfg(3, 0.99));
        let err = est.estimate(&[0.01; 5], &[0.01; 4]).unwrap_err();
        assert!(matches!(err, RiskError::Data(_)));
    }
}
