use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("data error: {0}")]
    Data(String),

    #[error("insufficient history: need {needed} observations, have {available}")]
    InsufficientHistory { needed: usize, available: usize },

    #[error("degenerate volatility at index {0}: shock standardization is undefined")]
    DegenerateVolatility(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
