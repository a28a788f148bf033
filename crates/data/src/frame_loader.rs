use crate::error::DataError;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Loads market data with the columnar engine into a polars `DataFrame`.
///
/// Timestamps are parsed during the scan and the frame is sorted ascending
/// by `timestamp`, mirroring what the row-oriented loader guarantees.
///
/// # Errors
///
/// Returns [`DataError::Missing`] if the file does not exist, or the
/// underlying polars error if the scan fails.
pub fn load_dataframe(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(DataError::Missing(path.display().to_string()).into());
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("failed to open CSV: {}", path.display()))?
        .finish()
        .with_context(|| format!("failed to read CSV: {}", path.display()))?;

    let df = df
        .sort(["timestamp"], SortMultipleOptions::default())
        .context("failed to sort market data by timestamp")?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_loader::write_records;
    use chrono::TimeZone;
    use chrono::Utc;
    use quantbench_core::PriceRecord;
    use tempfile::TempDir;

    #[test]
    fn frame_and_record_loaders_agree_on_row_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market.csv");

        let records: Vec<PriceRecord> = (0..10)
            .map(|i| {
                PriceRecord::new(
                    Utc.timestamp_opt(i * 60, 0).unwrap(),
                    if i % 2 == 0 { "AAPL" } else { "MSFT" },
                    100.0 + i as f64,
                )
            })
            .collect();
        write_records(&path, &records).unwrap();

        let df = load_dataframe(&path).unwrap();
        assert_eq!(df.height(), records.len());
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(load_dataframe(Path::new("nope.csv")).is_err());
    }
}
