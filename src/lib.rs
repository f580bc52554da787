//! Portfolio tail-risk engine.
//!
//! Transforms a daily price history and static portfolio weights into
//! rolling Historical Simulation (HS) and volatility-Filtered Historical
//! Simulation (FHS) VaR/ES estimates, flags days whose realized return
//! breaches the predicted VaR, and classifies the rolling breach count with
//! a Basel-style traffic light.

pub mod backtest;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod input;
pub mod model;
pub mod report;
pub mod returns;
pub mod volatility;
