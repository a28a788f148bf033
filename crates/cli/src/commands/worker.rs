//! Child side of the process pool: one batch in on stdin, results out on
//! stdout, nonzero exit on protocol errors so the parent records the loss.

use anyhow::Result;
use clap::Subcommand;
use quantbench_analytics::compute_rolling_rows;
use quantbench_core::PriceHistoryIndex;
use quantbench_parallel::{serve_worker, SymbolSeries};
use quantbench_portfolio::{compute_position_metrics, Position};

#[derive(Debug, Clone, Subcommand)]
pub enum WorkerKind {
    /// Per-symbol rolling metrics
    Rolling,
    /// Per-position portfolio metrics
    Position,
}

pub fn execute(kind: &WorkerKind) -> Result<()> {
    match kind {
        WorkerKind::Rolling => serve_worker(|window: &usize, series: SymbolSeries| {
            compute_rolling_rows(&series.records, *window)
        }),
        WorkerKind::Position => {
            serve_worker(|index: &PriceHistoryIndex, position: Position| {
                compute_position_metrics(&position, index)
            })
        }
    }
}
