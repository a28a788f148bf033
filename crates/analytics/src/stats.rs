/// Sample standard deviation (n-1 denominator). Returns `0.0` for fewer
/// than two observations.
#[must_use]
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Worst peak-to-trough decline over a price series.
///
/// Evaluates `(price - running_max) / running_max` pointwise from the start
/// and returns the minimum. Non-positive by construction: exactly `0.0` for
/// an empty or monotonically non-decreasing series.
#[must_use]
pub fn compute_drawdown(prices: &[f64]) -> f64 {
    let mut max_drawdown: f64 = 0.0;
    let mut peak = match prices.first() {
        Some(first) => *first,
        None => return 0.0,
    };

    for &price in prices {
        if price > peak {
            peak = price;
        }
        let drawdown = (price - peak) / peak;
        if drawdown < max_drawdown {
            max_drawdown = drawdown;
        }
    }

    if max_drawdown.is_finite() {
        max_drawdown
    } else {
        0.0
    }
}

/// Standard deviation of percent-change returns over the trailing `window`
/// observations, evaluated at the most recent point only.
///
/// A full window needs `window` returns, which takes `window + 1` prices;
/// shorter histories yield `0.0`.
#[must_use]
pub fn trailing_return_volatility(prices: &[f64], window: usize) -> f64 {
    if window == 0 || prices.len() < window + 1 {
        return 0.0;
    }

    let tail = &prices[prices.len() - (window + 1)..];
    let returns: Vec<f64> = tail.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    if returns.iter().any(|r| !r.is_finite()) {
        return 0.0;
    }

    sample_std(&returns)
}
