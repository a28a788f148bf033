//! Full analysis: every phase in order, then the markdown report.

use super::phases;
use anyhow::Result;
use quantbench_core::ConfigLoader;
use quantbench_report::{write_report, ReportRow};
use std::path::PathBuf;
use tracing::info;

pub fn execute(
    data: Option<String>,
    portfolio: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let config = ConfigLoader::load()?;
    let data_path = phases::data_path(&config, data);
    let portfolio_path = phases::portfolio_path(&config, portfolio);
    let output_path = PathBuf::from(output.unwrap_or_else(|| config.report.output_path.clone()));

    info!("starting full analysis");

    let ingestion = phases::ingest(&config, &data_path)?;
    let rolling = phases::rolling(&config, &data_path)?;
    let parallelism = phases::parallelism(&config, &data_path)?;
    let portfolio_profile = phases::portfolio(&config, &data_path, &portfolio_path)?;

    if let Some(result) = &portfolio_profile.result {
        println!("{}", serde_json::to_string_pretty(result)?);
    }

    let mut rows = vec![
        ReportRow::new(
            "1. Ingestion time",
            Some(ingestion.row_secs),
            Some(ingestion.columnar_secs),
        ),
        ReportRow::new(
            "2. Rolling analytics time",
            Some(rolling.row_secs),
            Some(rolling.columnar_secs),
        ),
        ReportRow::new(
            "3. Parallelism - sequential",
            Some(parallelism.sequential_secs),
            None,
        ),
        ReportRow::new(
            "3. Parallelism - threading",
            Some(parallelism.threaded_secs),
            None,
        ),
        ReportRow::new(
            "3. Parallelism - multiprocessing",
            Some(parallelism.process_secs),
            None,
        ),
        ReportRow::new(
            "4. Portfolio aggregation - sequential",
            Some(portfolio_profile.sequential_secs),
            None,
        ),
        ReportRow::new(
            "4. Portfolio aggregation - parallel",
            Some(portfolio_profile.parallel_secs),
            None,
        ),
    ];
    if let Some(secs) = portfolio_profile.multiprocess_secs {
        rows.push(ReportRow::new(
            "4. Portfolio aggregation - multiprocessing",
            Some(secs),
            None,
        ));
    }

    write_report(&output_path, &rows)?;
    info!(path = %output_path.display(), "report written");

    Ok(())
}
