//! The three concurrency strategies for the per-symbol rolling transform.
//!
//! All three produce identical output for the same input; the harness
//! exists to measure what each one costs.

use crate::process_pool::ProcessPool;
use anyhow::Result;
use quantbench_analytics::{compute_rolling_rows, RollingRow};
use quantbench_core::PriceRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One symbol's full, time-sorted record series: the unit of work a
/// strategy dispatches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSeries {
    pub symbol: String,
    pub records: Vec<PriceRecord>,
}

/// Groups records by symbol, sorted by symbol name so output order is
/// deterministic across strategies.
#[must_use]
pub fn split_by_symbol(records: &[PriceRecord]) -> Vec<SymbolSeries> {
    let mut by_symbol: BTreeMap<&str, Vec<PriceRecord>> = BTreeMap::new();
    for record in records {
        by_symbol
            .entry(record.symbol.as_str())
            .or_default()
            .push(record.clone());
    }

    by_symbol
        .into_iter()
        .map(|(symbol, records)| SymbolSeries {
            symbol: symbol.to_string(),
            records,
        })
        .collect()
}

/// Baseline: one symbol after another on the calling thread.
#[must_use]
pub fn run_sequential(series: &[SymbolSeries], window: usize) -> Vec<RollingRow> {
    series
        .iter()
        .flat_map(|s| compute_rolling_rows(&s.records, window))
        .collect()
}

/// Thread pool via rayon. Shared-memory parallelism: no copies, no
/// serialization, and `collect` preserves input order.
#[must_use]
pub fn run_threaded(series: &[SymbolSeries], window: usize) -> Vec<RollingRow> {
    series
        .par_iter()
        .map(|s| compute_rolling_rows(&s.records, window))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Process pool. Each child gets a serialized copy of its symbols; results
/// come back in completion order and are reassembled by task index.
///
/// # Errors
///
/// Returns an error if a worker produced no result for a symbol — unlike
/// the portfolio calculator there is no meaningful zero substitute for a
/// missing slice of the output table.
pub fn run_process(
    series: &[SymbolSeries],
    window: usize,
    pool: &ProcessPool,
) -> Result<Vec<RollingRow>> {
    let results: Vec<Option<Vec<RollingRow>>> = pool.execute(&window, series.to_vec())?;

    let mut rows = Vec::new();
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Some(chunk) => rows.extend(chunk),
            None => anyhow::bail!(
                "worker produced no result for symbol {}",
                series[i].symbol
            ),
        }
    }
    Ok(rows)
}

/// Field-by-field comparison within `tol`. Metric options must agree on
/// presence, not just value.
#[must_use]
pub fn rows_match(a: &[RollingRow], b: &[RollingRow], tol: f64) -> bool {
    fn opt_close(x: Option<f64>, y: Option<f64>, tol: f64) -> bool {
        match (x, y) {
            (None, None) => true,
            (Some(x), Some(y)) => (x - y).abs() <= tol,
            _ => false,
        }
    }

    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.symbol == y.symbol
                && x.timestamp == y.timestamp
                && (x.price - y.price).abs() <= tol
                && opt_close(x.sma, y.sma, tol)
                && opt_close(x.volatility, y.volatility, tol)
                && opt_close(x.sharpe, y.sharpe, tol)
        })
}
