//! Row-oriented rolling analytics.
//!
//! The per-symbol transform: 20-period rolling mean and standard deviation
//! of price, plus a rolling Sharpe over percent-change returns. This is the
//! work unit the concurrency strategies fan out.

use crate::stats::sample_std;
use chrono::{DateTime, Utc};
use quantbench_core::PriceRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One input row enriched with rolling metrics. Metrics are `None` until
/// the window has filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingRow {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub price: f64,
    pub sma: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe: Option<f64>,
}

/// Computes rolling metrics for every symbol in `records`.
///
/// Records must be sorted ascending by timestamp (loaders guarantee this).
/// Output is ordered by `(symbol, timestamp)`, matching the columnar
/// engine's sort, so the two can be compared row for row.
#[must_use]
pub fn compute_rolling_rows(records: &[PriceRecord], window: usize) -> Vec<RollingRow> {
    let mut by_symbol: BTreeMap<&str, Vec<&PriceRecord>> = BTreeMap::new();
    for record in records {
        by_symbol.entry(record.symbol.as_str()).or_default().push(record);
    }

    let mut rows = Vec::with_capacity(records.len());
    for series in by_symbol.into_values() {
        rows.extend(compute_symbol_series(&series, window));
    }
    rows
}

fn compute_symbol_series(series: &[&PriceRecord], window: usize) -> Vec<RollingRow> {
    let prices: Vec<Option<f64>> = series.iter().map(|r| Some(r.price)).collect();
    let sma = rolling_mean(&prices, window);
    let volatility = rolling_std(&prices, window);

    let mut returns: Vec<Option<f64>> = Vec::with_capacity(series.len());
    returns.push(None);
    for pair in series.windows(2) {
        let ret = pair[1].price / pair[0].price - 1.0;
        returns.push(ret.is_finite().then_some(ret));
    }

    let mean_ret = rolling_mean(&returns, window);
    let std_ret = rolling_std(&returns, window);

    series
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let sharpe = match (mean_ret[i], std_ret[i]) {
                (Some(mean), Some(std)) => {
                    let sharpe = mean / std;
                    sharpe.is_finite().then_some(sharpe)
                }
                _ => None,
            };
            RollingRow {
                timestamp: record.timestamp,
                symbol: record.symbol.clone(),
                price: record.price,
                sma: sma[i],
                volatility: volatility[i],
                sharpe,
            }
        })
        .collect()
}

/// Rolling mean with `min_periods == window`: `None` until the trailing
/// window is full and gap-free.
fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Rolling sample standard deviation with the same window semantics.
fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling_apply(values, window, sample_std)
}

fn rolling_apply(
    values: &[Option<f64>],
    window: usize,
    stat: impl Fn(&[f64]) -> f64,
) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut buffer = Vec::with_capacity(window);
    for i in (window - 1)..values.len() {
        buffer.clear();
        let slice = &values[i + 1 - window..=i];
        if slice.iter().all(Option::is_some) {
            buffer.extend(slice.iter().flatten());
            out[i] = Some(stat(&buffer));
        }
    }
    out
}
