//! Execution strategies for portfolio aggregation.
//!
//! Shared contract: take a source tree and the price index, return a fresh
//! aggregated tree. Only per-position metric computation runs concurrently;
//! flatten, rebind, and aggregate are single-threaded on either side of it.

use crate::aggregate::aggregate;
use crate::metrics::compute_position_metrics;
use crate::model::{load_portfolio, PortfolioNode, Position};
use crate::tree::{flatten, rebind};
use anyhow::Result;
use quantbench_core::PriceHistoryIndex;
use quantbench_parallel::ProcessPool;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

/// Baseline: every position computed in flatten order on the calling
/// thread.
#[must_use]
pub fn run_sequential(tree: &PortfolioNode, index: &PriceHistoryIndex) -> PortfolioNode {
    let flat = flatten(tree);
    let computed: Vec<Position> = flat
        .iter()
        .map(|p| compute_position_metrics(p, index))
        .collect();
    finish(tree, computed)
}

/// Default parallel strategy: rayon thread pool over the flattened batch.
/// Workers share the index by reference; `collect` preserves flatten order,
/// which rebinding relies on.
#[must_use]
pub fn run_parallel(tree: &PortfolioNode, index: &PriceHistoryIndex) -> PortfolioNode {
    let flat = flatten(tree);
    let computed: Vec<Position> = flat
        .par_iter()
        .map(|p| compute_position_metrics(p, index))
        .collect();
    finish(tree, computed)
}

/// Process-pool strategy, kept for fault isolation between workers: each
/// child receives a serialized snapshot of the index. A lost worker
/// degrades to zeroed records for its positions, exactly like a failed
/// computation inside the calculator.
///
/// # Errors
///
/// Returns an error only if the batch cannot be serialized for dispatch.
pub fn run_multiprocess(
    tree: &PortfolioNode,
    index: &PriceHistoryIndex,
    pool: &ProcessPool,
) -> Result<PortfolioNode> {
    let flat = flatten(tree);
    let results: Vec<Option<Position>> = pool.execute(index, flat.clone())?;

    let computed: Vec<Position> = results
        .into_iter()
        .zip(&flat)
        .map(|(result, original)| result.unwrap_or_else(|| original.zeroed()))
        .collect();
    Ok(finish(tree, computed))
}

fn finish(tree: &PortfolioNode, computed: Vec<Position>) -> PortfolioNode {
    let mut bound = rebind(tree, computed);
    aggregate(&mut bound);
    bound
}

/// Wall-clock comparison of the aggregation strategies, plus the final
/// aggregated tree from the parallel run.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioProfile {
    pub sequential_secs: f64,
    pub parallel_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiprocess_secs: Option<f64>,
    pub result: Option<PortfolioNode>,
}

impl PortfolioProfile {
    fn empty() -> Self {
        Self {
            sequential_secs: 0.0,
            parallel_secs: 0.0,
            multiprocess_secs: None,
            result: None,
        }
    }
}

/// Loads the portfolio file and times each strategy over it.
///
/// A missing or unreadable portfolio file is fatal to this phase: it is
/// reported once and an empty profile comes back, so an unrelated caller
/// never sees the failure as its own.
#[must_use]
pub fn profile_portfolio(
    path: &Path,
    index: &PriceHistoryIndex,
    pool: Option<&ProcessPool>,
) -> PortfolioProfile {
    let tree = match load_portfolio(path) {
        Ok(tree) => tree,
        Err(e) => {
            error!(error = %e, "portfolio aggregation skipped");
            return PortfolioProfile::empty();
        }
    };
    info!(positions = tree.position_count(), "portfolio loaded");

    let start = Instant::now();
    let sequential = run_sequential(&tree, index);
    let sequential_secs = start.elapsed().as_secs_f64();
    info!(secs = format!("{sequential_secs:.4}"), "sequential aggregation done");

    let start = Instant::now();
    let parallel = run_parallel(&tree, index);
    let parallel_secs = start.elapsed().as_secs_f64();
    info!(secs = format!("{parallel_secs:.4}"), "parallel aggregation done");

    let multiprocess_secs = pool.map(|pool| {
        let start = Instant::now();
        if let Err(e) = run_multiprocess(&tree, index, pool) {
            error!(error = %e, "multiprocess aggregation failed");
        }
        let secs = start.elapsed().as_secs_f64();
        info!(secs = format!("{secs:.4}"), "multiprocess aggregation done");
        secs
    });

    if sequential_secs < parallel_secs {
        info!("sequential won: fan-out overhead exceeded the per-position work");
    } else {
        let speedup = sequential_secs / parallel_secs.max(f64::MIN_POSITIVE);
        info!(speedup = format!("{speedup:.2}"), "parallel won");
    }
    if !crate::model::trees_match(&sequential, &parallel, 1e-9) {
        error!("sequential and parallel strategies disagree");
    }

    PortfolioProfile {
        sequential_secs,
        parallel_secs,
        multiprocess_secs,
        result: Some(parallel),
    }
}
