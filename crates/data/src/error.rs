//! Error types for market data ingestion.

use thiserror::Error;

/// Errors that can occur while loading or writing market data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The input file does not exist. Fatal to the whole run.
    #[error("market data file not found: {0}")]
    Missing(String),

    /// The CSV reader failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row does not have the expected `timestamp,symbol,price` shape.
    #[error("malformed record at line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
