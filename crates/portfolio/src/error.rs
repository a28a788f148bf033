//! Error types for portfolio loading.

use thiserror::Error;

/// Errors that can occur while loading a portfolio tree. A missing or
/// malformed portfolio file is fatal to the portfolio phase: there is
/// nothing to aggregate.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// The portfolio structure file does not exist.
    #[error("portfolio file not found: {0}")]
    Missing(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid portfolio tree.
    #[error("malformed portfolio JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
