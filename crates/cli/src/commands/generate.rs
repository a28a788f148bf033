//! Synthetic dataset generation: a market data CSV plus a small demo
//! portfolio tree that exercises nesting, shorts, duplicate lots, and an
//! unknown symbol.

use anyhow::{Context, Result};
use quantbench_data::{generate_records, write_records, SyntheticConfig};
use quantbench_portfolio::{PortfolioNode, Position};
use std::path::Path;
use tracing::info;

pub fn execute(data: &str, portfolio: &str, rows: usize, seed: u64) -> Result<()> {
    let data_path = Path::new(data);
    if let Some(parent) = data_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let config = SyntheticConfig {
        rows_per_symbol: rows,
        seed,
        ..SyntheticConfig::default()
    };
    let records = generate_records(&config);
    write_records(data_path, &records)?;
    info!(
        path = data,
        rows = records.len(),
        symbols = config.symbols.len(),
        "market data written"
    );

    let portfolio_path = Path::new(portfolio);
    if let Some(parent) = portfolio_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let tree = demo_portfolio();
    std::fs::write(portfolio_path, serde_json::to_string_pretty(&tree)?)
        .with_context(|| format!("failed to write {portfolio}"))?;
    info!(path = portfolio, positions = tree.position_count(), "portfolio written");

    Ok(())
}

fn demo_portfolio() -> PortfolioNode {
    PortfolioNode {
        name: Some("demo fund".to_string()),
        positions: vec![Position::new("AAPL", 10.0)],
        sub_portfolios: vec![
            PortfolioNode {
                name: Some("tech".to_string()),
                positions: vec![
                    Position::new("MSFT", 30.0),
                    Position::new("GOOG", -5.0),
                ],
                sub_portfolios: vec![PortfolioNode {
                    name: Some("ev".to_string()),
                    positions: vec![Position::new("TSLA", 8.0)],
                    ..PortfolioNode::default()
                }],
                ..PortfolioNode::default()
            },
            PortfolioNode {
                name: Some("lots".to_string()),
                // Two lots of the same size on purpose.
                positions: vec![Position::new("AMZN", 12.0), Position::new("AMZN", 12.0)],
                ..PortfolioNode::default()
            },
            PortfolioNode {
                name: Some("stale".to_string()),
                // Symbol that never appears in the market data.
                positions: vec![Position::new("DELISTED", 100.0)],
                ..PortfolioNode::default()
            },
        ],
        ..PortfolioNode::default()
    }
}
