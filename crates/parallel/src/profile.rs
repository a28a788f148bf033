use crate::process_pool::ProcessPool;
use crate::strategies::{rows_match, run_process, run_sequential, run_threaded, split_by_symbol};
use anyhow::Result;
use quantbench_core::PriceRecord;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

const EQUIVALENCE_TOLERANCE: f64 = 1e-9;

/// Wall-clock comparison of the three concurrency strategies.
#[derive(Debug, Clone, Serialize)]
pub struct ParallelProfile {
    pub sequential_secs: f64,
    pub threaded_secs: f64,
    pub process_secs: f64,
    /// Whether all three strategies produced identical tables.
    pub consistent: bool,
}

/// Runs the per-symbol rolling transform under all three strategies, times
/// each, and verifies the outputs agree within tolerance.
///
/// # Errors
///
/// Returns an error if the process strategy loses a worker; the other two
/// strategies cannot partially fail.
pub fn profile_parallelism(
    records: &[PriceRecord],
    window: usize,
    pool: &ProcessPool,
) -> Result<ParallelProfile> {
    let series = split_by_symbol(records);

    let start = Instant::now();
    let sequential = run_sequential(&series, window);
    let sequential_secs = start.elapsed().as_secs_f64();
    info!(secs = format!("{sequential_secs:.4}"), "sequential strategy done");

    let start = Instant::now();
    let threaded = run_threaded(&series, window);
    let threaded_secs = start.elapsed().as_secs_f64();
    info!(secs = format!("{threaded_secs:.4}"), "threaded strategy done");

    let start = Instant::now();
    let processed = run_process(&series, window, pool)?;
    let process_secs = start.elapsed().as_secs_f64();
    info!(
        secs = format!("{process_secs:.4}"),
        workers = pool.workers(),
        "process strategy done"
    );

    let consistent = rows_match(&sequential, &threaded, EQUIVALENCE_TOLERANCE)
        && rows_match(&sequential, &processed, EQUIVALENCE_TOLERANCE);
    if consistent {
        info!("all strategies produced consistent results");
    } else {
        warn!("strategy outputs diverged beyond tolerance");
    }

    Ok(ParallelProfile {
        sequential_secs,
        threaded_secs,
        process_secs,
        consistent,
    })
}
