use crate::config::RiskConfig;
use crate::error::RiskError;

/// EWMA filter producing a per-day conditional volatility estimate.
///
/// The recursion `sigma[t]^2 = decay * sigma[t-1]^2 + (1 - decay) *
/// return[t-1]^2` is strictly causal: `sigma[t]` never sees `return[t]` or
/// anything later, so it can stand in as the day-`t` volatility without
/// lookahead. The seed `sigma[0]` is the population standard deviation of
/// the first `seed_window` returns.
#[derive(Debug, Clone)]
pub struct EwmaVolatilityFilter {
    decay: f64,
    seed_window: usize,
}

impl EwmaVolatilityFilter {
    pub fn new(cfg: &RiskConfig) -> Self {
        Self {
            decay: cfg.decay,
            seed_window: cfg.seed_window,
        }
    }

    /// Produce a volatility sequence the same length as `returns`.
    ///
    /// Fails with [`RiskError::InsufficientHistory`] when fewer than
    /// `seed_window` returns are available to form the seed.
    pub fn filter(&self, returns: &[f64]) -> Result<Vec<f64>, RiskError> {
        if returns.len() < self.seed_window {
            return Err(RiskError::InsufficientHistory {
                needed: self.seed_window,
                available: returns.len(),
            });
        }

        let seed = population_stdev(&returns[..self.seed_window]);

        // Explicit sequential fold over sigma^2; each day depends only on
        // the previous sigma and the previous return.
        let mut sigma = Vec::with_capacity(returns.len());
        sigma.push(seed);
        let mut prev_sq = seed * seed;
        for t in 1..returns.len() {
            let sq = self.decay * prev_sq + (1.0 - self.decay) * returns[t - 1].powi(2);
            sigma.push(sq.sqrt());
            prev_sq = sq;
        }
        Ok(sigma)
    }
}

fn population_stdev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    var.sqrt()
}
