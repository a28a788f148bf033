use crate::error::PortfolioError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single holding: a symbol and a signed quantity (negative for shorts).
///
/// The metric fields stay `None` until the position metric calculator has
/// run; they are omitted from JSON until then, so an input tree and an
/// enriched tree share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawdown: Option<f64>,
}

impl Position {
    #[must_use]
    pub fn new(symbol: impl Into<String>, quantity: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            value: None,
            volatility: None,
            drawdown: None,
        }
    }

    /// The substitute record for a position that could not be computed:
    /// same identity, all metrics zero.
    #[must_use]
    pub fn zeroed(&self) -> Self {
        Self {
            symbol: self.symbol.clone(),
            quantity: self.quantity,
            value: Some(0.0),
            volatility: Some(0.0),
            drawdown: Some(0.0),
        }
    }

    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.value.is_some() && self.volatility.is_some() && self.drawdown.is_some()
    }
}

/// A node in the portfolio tree: zero or more direct positions plus zero or
/// more owned child portfolios. Aggregate fields are populated bottom-up by
/// the aggregator and are meaningless before it runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<Position>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_portfolios: Vec<PortfolioNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_volatility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<f64>,
}

impl PortfolioNode {
    /// Total number of positions in this subtree.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.positions.len()
            + self
                .sub_portfolios
                .iter()
                .map(PortfolioNode::position_count)
                .sum::<usize>()
    }
}

/// Loads a portfolio tree from JSON. Absent `positions`/`sub_portfolios`
/// keys deserialize as empty collections.
///
/// # Errors
///
/// Returns [`PortfolioError::Missing`] if the file does not exist, or a
/// parse error for malformed JSON.
pub fn load_portfolio(path: &Path) -> Result<PortfolioNode, PortfolioError> {
    if !path.exists() {
        return Err(PortfolioError::Missing(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    let tree = serde_json::from_str(&contents)?;
    Ok(tree)
}

/// Compares two aggregated trees field by field within `tol`, recursing
/// through the whole structure.
#[must_use]
pub fn trees_match(a: &PortfolioNode, b: &PortfolioNode, tol: f64) -> bool {
    fn opt_close(x: Option<f64>, y: Option<f64>, tol: f64) -> bool {
        match (x, y) {
            (None, None) => true,
            (Some(x), Some(y)) => (x - y).abs() <= tol,
            _ => false,
        }
    }

    fn positions_match(a: &Position, b: &Position, tol: f64) -> bool {
        a.symbol == b.symbol
            && (a.quantity - b.quantity).abs() <= tol
            && opt_close(a.value, b.value, tol)
            && opt_close(a.volatility, b.volatility, tol)
            && opt_close(a.drawdown, b.drawdown, tol)
    }

    a.positions.len() == b.positions.len()
        && a.sub_portfolios.len() == b.sub_portfolios.len()
        && opt_close(a.total_value, b.total_value, tol)
        && opt_close(a.aggregate_volatility, b.aggregate_volatility, tol)
        && opt_close(a.max_drawdown, b.max_drawdown, tol)
        && a.positions
            .iter()
            .zip(&b.positions)
            .all(|(x, y)| positions_match(x, y, tol))
        && a.sub_portfolios
            .iter()
            .zip(&b.sub_portfolios)
            .all(|(x, y)| trees_match(x, y, tol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_deserialize_as_empty() {
        let tree: PortfolioNode = serde_json::from_str("{}").unwrap();

        assert!(tree.positions.is_empty());
        assert!(tree.sub_portfolios.is_empty());
        assert!(tree.total_value.is_none());
    }

    #[test]
    fn bare_position_round_trips_without_metric_keys() {
        let json = r#"{"positions": [{"symbol": "AAPL", "quantity": 10}]}"#;
        let tree: PortfolioNode = serde_json::from_str(json).unwrap();
        assert!(!tree.positions[0].is_computed());

        let back = serde_json::to_string(&tree).unwrap();
        assert!(!back.contains("value"));
        assert!(!back.contains("volatility"));
    }

    #[test]
    fn nested_structure_parses() {
        let json = r#"{
            "name": "root",
            "positions": [{"symbol": "AAPL", "quantity": 10}],
            "sub_portfolios": [
                {"positions": [{"symbol": "MSFT", "quantity": -5}]}
            ]
        }"#;
        let tree: PortfolioNode = serde_json::from_str(json).unwrap();

        assert_eq!(tree.position_count(), 2);
        assert!((tree.sub_portfolios[0].positions[0].quantity - (-5.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let result = load_portfolio(Path::new("no/such/portfolio.json"));
        assert!(matches!(result, Err(PortfolioError::Missing(_))));
    }
}
