/// Rounds to a fixed number of decimal places for display stability.
///
/// Monetary values are reported at 2 places, ratios (volatility, drawdown)
/// at 4. Non-finite inputs collapse to `0.0` so a degenerate series never
/// leaks `NaN` into a report.
#[must_use]
pub fn round_to(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_places() {
        assert!((round_to(3.14159, 2) - 3.14).abs() < f64::EPSILON);
        assert!((round_to(2.005, 2) - 2.01).abs() < 1e-9);
    }

    #[test]
    fn rounds_to_four_places() {
        assert!((round_to(0.123_456, 4) - 0.1235).abs() < 1e-12);
    }

    #[test]
    fn negative_values_round_away_from_zero() {
        assert!((round_to(-0.20004, 4) - (-0.2)).abs() < 1e-12);
    }

    #[test]
    fn non_finite_collapses_to_zero() {
        assert!((round_to(f64::NAN, 2)).abs() < f64::EPSILON);
        assert!((round_to(f64::INFINITY, 4)).abs() < f64::EPSILON);
    }
}
