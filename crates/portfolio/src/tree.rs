//! Tree flattening and rebinding.
//!
//! `flatten` pulls every position out of the tree in pre-order so a
//! strategy can dispatch them as a flat batch; `rebind` rebuilds the tree
//! with the computed batch slotted back in. A position's ordinal in the
//! flattened sequence is its identity: computation must preserve input
//! order (both strategies do), and then two lots with the same symbol and
//! quantity can never collide the way a key-based mapping would let them.

use crate::model::{PortfolioNode, Position};
use tracing::warn;

/// Collects every position in the subtree, pre-order: a node's own
/// positions first, then each child portfolio in declaration order.
#[must_use]
pub fn flatten(node: &PortfolioNode) -> Vec<Position> {
    let mut out = Vec::with_capacity(node.position_count());
    collect(node, &mut out);
    out
}

fn collect(node: &PortfolioNode, out: &mut Vec<Position>) {
    out.extend(node.positions.iter().cloned());
    for sub in &node.sub_portfolios {
        collect(sub, out);
    }
}

/// Builds a fresh tree with each position slot filled by the computed
/// position at the same pre-order ordinal. The input tree is not touched,
/// and aggregate annotations start out empty on the new tree.
///
/// `computed` must have exactly one entry per flattened position. If it
/// runs short the unmatched slots are dropped with a warning; the public
/// strategy entry points always hand over a full batch, so that path only
/// triggers on misuse.
#[must_use]
pub fn rebind(node: &PortfolioNode, computed: Vec<Position>) -> PortfolioNode {
    let mut slots = computed.into_iter();
    let tree = rebind_node(node, &mut slots);

    let leftover = slots.count();
    if leftover > 0 {
        warn!(leftover, "computed batch larger than tree; extras discarded");
    }
    tree
}

fn rebind_node(
    node: &PortfolioNode,
    slots: &mut std::vec::IntoIter<Position>,
) -> PortfolioNode {
    let positions = node
        .positions
        .iter()
        .filter_map(|original| match slots.next() {
            Some(computed) => Some(computed),
            None => {
                warn!(symbol = %original.symbol, "no computed result for position; dropped from tree");
                None
            }
        })
        .collect();

    let sub_portfolios = node
        .sub_portfolios
        .iter()
        .map(|sub| rebind_node(sub, slots))
        .collect();

    PortfolioNode {
        name: node.name.clone(),
        positions,
        sub_portfolios,
        total_value: None,
        aggregate_volatility: None,
        max_drawdown: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> PortfolioNode {
        PortfolioNode {
            name: Some("root".to_string()),
            positions: vec![Position::new("AAPL", 10.0)],
            sub_portfolios: vec![
                PortfolioNode {
                    positions: vec![Position::new("MSFT", 5.0), Position::new("GOOG", 2.0)],
                    ..PortfolioNode::default()
                },
                PortfolioNode {
                    sub_portfolios: vec![PortfolioNode {
                        positions: vec![Position::new("TSLA", -1.0)],
                        ..PortfolioNode::default()
                    }],
                    ..PortfolioNode::default()
                },
            ],
            ..PortfolioNode::default()
        }
    }

    #[test]
    fn flatten_is_preorder() {
        let flat = flatten(&sample_tree());

        let symbols: Vec<&str> = flat.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "GOOG", "TSLA"]);
    }

    #[test]
    fn rebind_restores_positions_to_their_nodes() {
        let tree = sample_tree();
        let computed: Vec<Position> = flatten(&tree).iter().map(Position::zeroed).collect();

        let bound = rebind(&tree, computed);

        assert_eq!(bound.positions[0].symbol, "AAPL");
        assert!(bound.positions[0].is_computed());
        assert_eq!(bound.sub_portfolios[0].positions[1].symbol, "GOOG");
        assert_eq!(
            bound.sub_portfolios[1].sub_portfolios[0].positions[0].symbol,
            "TSLA"
        );
    }

    #[test]
    fn rebind_leaves_source_tree_untouched() {
        let tree = sample_tree();
        let computed: Vec<Position> = flatten(&tree).iter().map(Position::zeroed).collect();

        let _bound = rebind(&tree, computed);

        assert!(!tree.positions[0].is_computed());
    }

    #[test]
    fn duplicate_lots_survive_rebinding() {
        // Two separate lots with identical symbol and quantity: a keyed
        // rebind would collapse them, the ordinal rebind must not.
        let tree = PortfolioNode {
            positions: vec![Position::new("AAPL", 10.0), Position::new("AAPL", 10.0)],
            ..PortfolioNode::default()
        };
        let mut computed: Vec<Position> = flatten(&tree).iter().map(Position::zeroed).collect();
        computed[0].value = Some(111.0);
        computed[1].value = Some(222.0);

        let bound = rebind(&tree, computed);

        assert_eq!(bound.positions.len(), 2);
        assert!((bound.positions[0].value.unwrap() - 111.0).abs() < f64::EPSILON);
        assert!((bound.positions[1].value.unwrap() - 222.0).abs() < f64::EPSILON);
    }

    #[test]
    fn short_batch_drops_unmatched_slots() {
        let tree = sample_tree();
        let one = vec![flatten(&tree)[0].zeroed()];

        let bound = rebind(&tree, one);

        assert_eq!(bound.position_count(), 1);
        assert_eq!(bound.positions[0].symbol, "AAPL");
    }
}
