use crate::error::DataError;
use chrono::{DateTime, Utc};
use csv::Writer;
use quantbench_core::PriceRecord;
use std::fs::File;
use std::path::Path;

/// Loads market data with the row-oriented engine: one typed record per row.
///
/// Expects a `timestamp,symbol,price` header. Records are sorted ascending
/// by timestamp before being returned, which the price history index relies
/// on.
///
/// # Errors
///
/// Returns [`DataError::Missing`] if the file does not exist, and a parse
/// error describing the offending line for malformed rows.
pub fn load_records(path: &Path) -> Result<Vec<PriceRecord>, DataError> {
    if !path.exists() {
        return Err(DataError::Missing(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        // Header occupies line 1.
        let line = row + 2;
        if record.len() < 3 {
            return Err(DataError::Malformed {
                line,
                message: format!("expected 3 fields, got {}", record.len()),
            });
        }

        let timestamp: DateTime<Utc> =
            record[0].parse().map_err(|e| DataError::Malformed {
                line,
                message: format!("bad timestamp '{}': {e}", &record[0]),
            })?;
        let symbol = record[1].to_string();
        let price: f64 = record[2].parse().map_err(|e| DataError::Malformed {
            line,
            message: format!("bad price '{}': {e}", &record[2]),
        })?;

        records.push(PriceRecord::new(timestamp, symbol, price));
    }

    records.sort_by_key(|r| r.timestamp);
    Ok(records)
}

/// Writes records as `timestamp,symbol,price` CSV, sorted by timestamp.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row fails to write.
pub fn write_records(path: &Path, records: &[PriceRecord]) -> Result<(), DataError> {
    let file = File::create(path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["timestamp", "symbol", "price"])?;

    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.timestamp);

    for record in sorted {
        writer.write_record(&[
            record.timestamp.to_rfc3339(),
            record.symbol.clone(),
            record.price.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn record(secs: i64, symbol: &str, price: f64) -> PriceRecord {
        PriceRecord::new(Utc.timestamp_opt(secs, 0).unwrap(), symbol, price)
    }

    #[test]
    fn write_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("market.csv");

        let records = vec![
            record(2, "MSFT", 50.25),
            record(1, "AAPL", 100.5),
        ];
        write_records(&path, &records).unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        // Sorted by timestamp on the way out.
        assert_eq!(loaded[0].symbol, "AAPL");
        assert_eq!(loaded[1].symbol, "MSFT");
        assert!((loaded[0].price - 100.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let result = load_records(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(DataError::Missing(_))));
    }

    #[test]
    fn malformed_price_names_the_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "timestamp,symbol,price\n2024-01-02T09:30:00Z,AAPL,not-a-number\n",
        )
        .unwrap();

        match load_records(&path) {
            Err(DataError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }
}
