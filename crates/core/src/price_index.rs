//! Symbol-keyed lookup over ingested market data.
//!
//! Built once per run from the time-sorted record table, then treated as
//! read-only by every execution strategy. The index is serializable so that
//! process-pool workers can receive a snapshot of it over the wire.

use crate::records::PriceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The most recent observation for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestQuote {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Maps each symbol to its latest quote and its full ascending price history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistoryIndex {
    latest: HashMap<String, LatestQuote>,
    history: HashMap<String, Vec<f64>>,
}

impl PriceHistoryIndex {
    /// Builds the index from records sorted ascending by timestamp.
    ///
    /// The last record seen for a symbol wins as its latest quote, which is
    /// correct only because the input is time-sorted; loaders guarantee that.
    #[must_use]
    pub fn from_records(records: &[PriceRecord]) -> Self {
        let mut latest: HashMap<String, LatestQuote> = HashMap::new();
        let mut history: HashMap<String, Vec<f64>> = HashMap::new();

        for record in records {
            latest.insert(
                record.symbol.clone(),
                LatestQuote {
                    timestamp: record.timestamp,
                    price: record.price,
                },
            );
            history
                .entry(record.symbol.clone())
                .or_default()
                .push(record.price);
        }

        Self { latest, history }
    }

    #[must_use]
    pub fn latest(&self, symbol: &str) -> Option<&LatestQuote> {
        self.latest.get(symbol)
    }

    #[must_use]
    pub fn history(&self, symbol: &str) -> Option<&[f64]> {
        self.history.get(symbol).map(Vec::as_slice)
    }

    /// Symbols present in the index, sorted for deterministic iteration.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.latest.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}
