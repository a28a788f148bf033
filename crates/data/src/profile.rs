use crate::{csv_loader, frame_loader};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Wall-clock comparison of the two ingestion engines.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionProfile {
    pub row_secs: f64,
    pub columnar_secs: f64,
    pub rows: usize,
}

/// Times both loaders over `iterations` runs each and reports the mean.
///
/// # Errors
///
/// Returns an error if the data file is missing or unreadable; ingestion
/// failing means nothing downstream can run, so this is fatal to the run.
pub fn profile_ingestion(path: &Path, iterations: usize) -> Result<IngestionProfile> {
    let iterations = iterations.max(1);

    let start = Instant::now();
    let mut rows = 0;
    for _ in 0..iterations {
        rows = csv_loader::load_records(path)?.len();
    }
    let row_secs = start.elapsed().as_secs_f64() / iterations as f64;

    let start = Instant::now();
    for _ in 0..iterations {
        frame_loader::load_dataframe(path)?;
    }
    let columnar_secs = start.elapsed().as_secs_f64() / iterations as f64;

    info!(
        rows,
        row_secs = format!("{row_secs:.4}"),
        columnar_secs = format!("{columnar_secs:.4}"),
        "ingestion profile complete"
    );

    Ok(IngestionProfile {
        row_secs,
        columnar_secs,
        rows,
    })
}
