//! Bottom-up portfolio aggregation.
//!
//! Post-order walk: every child portfolio is aggregated before its parent
//! folds it in, so a node's totals are valid the moment they are written.
//! Positions must already be metric-computed; the aggregator only reads
//! them.

use crate::model::PortfolioNode;
use quantbench_core::round_to;

/// Aggregates the subtree rooted at `node` in place.
///
/// Per node: `total_value` is the sum of descendant position values,
/// `aggregate_volatility` the value-weighted mean of their volatilities
/// (0.0 when total value is not positive), and `max_drawdown` the worst
/// drawdown seen anywhere below, seeded at 0.0 so a subtree with no losses
/// reports exactly zero. An aggregated child folds into its parent as if it
/// were a single large position.
///
/// Running this twice over the same tree yields identical totals.
pub fn aggregate(node: &mut PortfolioNode) {
    let mut total_value = 0.0;
    let mut weighted_vol = 0.0;
    let mut max_drawdown: f64 = 0.0;

    for position in &node.positions {
        let value = position.value.unwrap_or(0.0);
        total_value += value;
        weighted_vol += value * position.volatility.unwrap_or(0.0);
        max_drawdown = max_drawdown.min(position.drawdown.unwrap_or(0.0));
    }

    for sub in &mut node.sub_portfolios {
        aggregate(sub);
        let sub_value = sub.total_value.unwrap_or(0.0);
        total_value += sub_value;
        weighted_vol += sub_value * sub.aggregate_volatility.unwrap_or(0.0);
        max_drawdown = max_drawdown.min(sub.max_drawdown.unwrap_or(0.0));
    }

    node.total_value = Some(round_to(total_value, 2));
    node.aggregate_volatility = Some(if total_value > 0.0 {
        round_to(weighted_vol / total_value, 4)
    } else {
        0.0
    });
    node.max_drawdown = Some(round_to(max_drawdown, 4));
}
