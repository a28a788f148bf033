use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single market data observation: one price for one symbol at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub price: f64,
}

impl PriceRecord {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, symbol: impl Into<String>, price: f64) -> Self {
        Self {
            timestamp,
            symbol: symbol.into(),
            price,
        }
    }
}
