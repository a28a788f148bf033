use crate::rolling::compute_rolling_rows;
use crate::vectorized::compute_rolling_frame;
use anyhow::Result;
use polars::prelude::DataFrame;
use quantbench_core::PriceRecord;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Wall-clock comparison of the two rolling-analytics engines.
#[derive(Debug, Clone, Serialize)]
pub struct RollingProfile {
    pub row_secs: f64,
    pub columnar_secs: f64,
}

/// Times the row engine and the columnar engine once each over the same
/// dataset.
///
/// # Errors
///
/// Returns an error if the columnar query fails.
pub fn profile_rolling(
    records: &[PriceRecord],
    frame: &DataFrame,
    window: usize,
) -> Result<RollingProfile> {
    let start = Instant::now();
    let rows = compute_rolling_rows(records, window);
    let row_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    compute_rolling_frame(frame, window)?;
    let columnar_secs = start.elapsed().as_secs_f64();

    info!(
        rows = rows.len(),
        row_secs = format!("{row_secs:.4}"),
        columnar_secs = format!("{columnar_secs:.4}"),
        "rolling analytics profile complete"
    );

    Ok(RollingProfile {
        row_secs,
        columnar_secs,
    })
}
