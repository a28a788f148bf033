//! The position metric calculator.
//!
//! Pure leaf computation: one position plus the read-only price index in,
//! one enriched position out. This is the work unit both execution
//! strategies dispatch, so it must never panic and never let a failure
//! escape — a bad position becomes a zeroed record, not an aborted batch.

use crate::model::Position;
use anyhow::Result;
use quantbench_analytics::{compute_drawdown, trailing_return_volatility};
use quantbench_core::{round_to, PriceHistoryIndex};
use tracing::{error, warn};

/// Trailing window for position volatility, in observations.
pub const VOLATILITY_WINDOW: usize = 20;

/// Computes `value`, `volatility`, and `drawdown` for one position.
///
/// A symbol with no market data yields a zeroed record and a warning.
/// Any unexpected computation failure is caught here, logged with the
/// offending symbol, and substituted with a zeroed record.
#[must_use]
pub fn compute_position_metrics(position: &Position, index: &PriceHistoryIndex) -> Position {
    match try_compute(position, index) {
        Ok(computed) => computed,
        Err(e) => {
            error!(symbol = %position.symbol, error = %e, "position metric computation failed; substituting zeroed record");
            position.zeroed()
        }
    }
}

fn try_compute(position: &Position, index: &PriceHistoryIndex) -> Result<Position> {
    let Some(latest) = index.latest(&position.symbol) else {
        warn!(symbol = %position.symbol, "no market data for symbol; position zeroed");
        return Ok(position.zeroed());
    };

    let value = position.quantity * latest.price;
    if !value.is_finite() {
        anyhow::bail!(
            "non-finite value from quantity {} and price {}",
            position.quantity,
            latest.price
        );
    }

    let history = index.history(&position.symbol).unwrap_or(&[]);
    let volatility = trailing_return_volatility(history, VOLATILITY_WINDOW);
    let drawdown = compute_drawdown(history);

    Ok(Position {
        symbol: position.symbol.clone(),
        quantity: position.quantity,
        value: Some(round_to(value, 2)),
        volatility: Some(round_to(volatility, 4)),
        drawdown: Some(round_to(drawdown, 4)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quantbench_core::PriceRecord;

    fn index_from(prices: &[(&str, f64)]) -> PriceHistoryIndex {
        let records: Vec<PriceRecord> = prices
            .iter()
            .enumerate()
            .map(|(i, (symbol, price))| {
                PriceRecord::new(Utc.timestamp_opt(i as i64, 0).unwrap(), *symbol, *price)
            })
            .collect();
        PriceHistoryIndex::from_records(&records)
    }

    #[test]
    fn value_is_quantity_times_latest_price() {
        let index = index_from(&[("AAPL", 90.0), ("AAPL", 100.0)]);
        let computed = compute_position_metrics(&Position::new("AAPL", 10.0), &index);

        assert!((computed.value.unwrap() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn short_position_has_negative_value() {
        let index = index_from(&[("AAPL", 100.0)]);
        let computed = compute_position_metrics(&Position::new("AAPL", -3.0), &index);

        assert!((computed.value.unwrap() - (-300.0)).abs() < 1e-9);
    }

    #[test]
    fn missing_symbol_zeroes_without_raising() {
        let index = index_from(&[("AAPL", 100.0)]);
        let computed = compute_position_metrics(&Position::new("UNKNOWN", 5.0), &index);

        assert!((computed.value.unwrap()).abs() < f64::EPSILON);
        assert!((computed.volatility.unwrap()).abs() < f64::EPSILON);
        assert!((computed.drawdown.unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn short_history_means_zero_volatility() {
        // 5 observations: far below the 20-observation window.
        let index = index_from(&[
            ("AAPL", 100.0),
            ("AAPL", 101.0),
            ("AAPL", 99.0),
            ("AAPL", 103.0),
            ("AAPL", 102.0),
        ]);
        let computed = compute_position_metrics(&Position::new("AAPL", 1.0), &index);

        assert!((computed.volatility.unwrap()).abs() < f64::EPSILON);
    }

    #[test]
    fn drawdown_reflects_worst_decline() {
        let index = index_from(&[("AAPL", 100.0), ("AAPL", 80.0), ("AAPL", 120.0)]);
        let computed = compute_position_metrics(&Position::new("AAPL", 1.0), &index);

        assert!((computed.drawdown.unwrap() - (-0.2)).abs() < 1e-9);
    }

    #[test]
    fn long_history_produces_rounded_volatility() {
        let prices: Vec<(&str, f64)> = (0..30)
            .map(|i| ("AAPL", 100.0 + f64::from(i % 5)))
            .collect();
        let index = index_from(&prices);
        let computed = compute_position_metrics(&Position::new("AAPL", 1.0), &index);

        let vol = computed.volatility.unwrap();
        assert!(vol > 0.0);
        // Rounded to 4 decimal places.
        assert!(((vol * 10_000.0).round() / 10_000.0 - vol).abs() < 1e-12);
    }
}
