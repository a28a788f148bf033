use chrono::{TimeZone, Utc};
use quantbench_core::{PriceHistoryIndex, PriceRecord};
use quantbench_portfolio::{
    run_parallel, run_sequential, trees_match, PortfolioNode, Position,
};

/// Builds an index with enough history per symbol for a full volatility
/// window, including one symbol with a pronounced drawdown.
fn market_index() -> PriceHistoryIndex {
    let mut records = Vec::new();
    for i in 0..40i64 {
        records.push(PriceRecord::new(
            Utc.timestamp_opt(i * 60, 0).unwrap(),
            "AAPL",
            100.0 + (i as f64) * 0.3 + ((i % 4) as f64),
        ));
        records.push(PriceRecord::new(
            Utc.timestamp_opt(i * 60, 0).unwrap(),
            "MSFT",
            // Rally, crash, partial recovery.
            if i < 15 {
                50.0 + i as f64
            } else if i < 25 {
                64.0 - ((i - 15) as f64) * 2.0
            } else {
                44.0 + ((i - 25) as f64) * 0.5
            },
        ));
        records.push(PriceRecord::new(
            Utc.timestamp_opt(i * 60, 0).unwrap(),
            "TSLA",
            200.0 - (i as f64) * 0.1,
        ));
    }
    PriceHistoryIndex::from_records(&records)
}

fn portfolio() -> PortfolioNode {
    PortfolioNode {
        name: Some("fund".to_string()),
        positions: vec![Position::new("AAPL", 10.0)],
        sub_portfolios: vec![
            PortfolioNode {
                name: Some("tech".to_string()),
                positions: vec![
                    Position::new("MSFT", 20.0),
                    Position::new("TSLA", -2.0),
                    // Symbol with no market data at all.
                    Position::new("DELISTED", 7.0),
                ],
                ..PortfolioNode::default()
            },
            PortfolioNode {
                name: Some("lots".to_string()),
                // Duplicate lots: same symbol, same quantity.
                positions: vec![Position::new("AAPL", 5.0), Position::new("AAPL", 5.0)],
                ..PortfolioNode::default()
            },
        ],
        ..PortfolioNode::default()
    }
}

#[test]
fn sequential_and_parallel_agree_on_every_node() {
    let index = market_index();
    let tree = portfolio();

    let sequential = run_sequential(&tree, &index);
    let parallel = run_parallel(&tree, &index);

    assert!(trees_match(&sequential, &parallel, 1e-9));
}

#[test]
fn strategies_never_mutate_the_source_tree() {
    let index = market_index();
    let tree = portfolio();
    let before = tree.clone();

    let _ = run_sequential(&tree, &index);
    let _ = run_parallel(&tree, &index);

    assert_eq!(tree, before);
}

#[test]
fn aggregated_root_covers_all_positions() {
    let index = market_index();
    let aggregated = run_sequential(&portfolio(), &index);

    // Every position survives, including the unknown symbol and the
    // duplicate lots.
    assert_eq!(aggregated.position_count(), 6);

    // The unknown symbol is zeroed in place, not dropped.
    let delisted = &aggregated.sub_portfolios[0].positions[2];
    assert_eq!(delisted.symbol, "DELISTED");
    assert!((delisted.value.unwrap()).abs() < f64::EPSILON);

    // Root totals exist and reflect the shorts: total is the plain sum.
    let total = aggregated.total_value.unwrap();
    let by_hand: f64 = [
        &aggregated.positions[0],
        &aggregated.sub_portfolios[0].positions[0],
        &aggregated.sub_portfolios[0].positions[1],
        &aggregated.sub_portfolios[0].positions[2],
        &aggregated.sub_portfolios[1].positions[0],
        &aggregated.sub_portfolios[1].positions[1],
    ]
    .iter()
    .map(|p| p.value.unwrap())
    .sum();
    assert!((total - (by_hand * 100.0).round() / 100.0).abs() < 1e-9);

    // MSFT crashed from 64 to 44 in the fixture: the root inherits a
    // strictly negative worst drawdown.
    assert!(aggregated.max_drawdown.unwrap() < 0.0);
}

#[test]
fn duplicate_lots_keep_independent_values() {
    let index = market_index();
    let aggregated = run_sequential(&portfolio(), &index);

    let lots = &aggregated.sub_portfolios[1].positions;
    assert_eq!(lots.len(), 2);
    assert!(lots[0].value.unwrap() > 0.0);
    assert!((lots[0].value.unwrap() - lots[1].value.unwrap()).abs() < 1e-9);
}
