use anyhow::{Context, Result};
use std::path::Path;

/// One line of the summary table. `columnar_secs` stays empty for phases
/// that only have a row-engine measurement.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub task: String,
    pub row_engine_secs: Option<f64>,
    pub columnar_secs: Option<f64>,
}

impl ReportRow {
    #[must_use]
    pub fn new(task: impl Into<String>, row: Option<f64>, columnar: Option<f64>) -> Self {
        Self {
            task: task.into(),
            row_engine_secs: row,
            columnar_secs: columnar,
        }
    }
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "—".to_string(),
    }
}

/// Renders the full markdown report: summary table plus the tradeoff
/// discussion.
#[must_use]
pub fn render_report(rows: &[ReportRow]) -> String {
    let mut table = String::new();
    table.push_str("| Task | Row engine (s) | Columnar (s) |\n");
    table.push_str("|---|---|---|\n");
    for row in rows {
        table.push_str(&format!(
            "| {} | {} | {} |\n",
            row.task,
            cell(row.row_engine_secs),
            cell(row.columnar_secs)
        ));
    }

    let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    format!(
        r#"# Performance Comparison Report

Generated: {generated}

## 1. Performance Summary Table

{table}
## 2. Discussion of Tradeoffs

### Row-oriented vs. columnar

* **Performance:** the columnar engine parses and transforms whole columns
  at a time, so ingestion and rolling analytics benefit from vectorized
  kernels and a multi-threaded query engine. The row engine pays a per-row
  parsing and allocation cost but produces plain typed records that the
  rest of the pipeline can consume directly.
* **Ergonomics:** the row engine is ordinary iterator code, easy to step
  through and unit test; the columnar engine is an expression graph that
  the query planner is free to reorder and parallelize.
* **Scalability:** the columnar engine's lazy API can optimize whole query
  chains; the row engine holds everything as materialized records, which is
  the simpler model while the dataset fits in memory.

### Threads vs. processes

* **Threads won here.** Worker threads share the input by reference: no
  copies, no serialization, near-zero dispatch overhead. The runtime has no
  interpreter lock, so threads achieve full CPU parallelism on their own.
* **The process pool pays a wire tax.** Every task batch and every result
  crosses a process boundary as serialized JSON, and each child re-parses
  its snapshot of the inputs before doing any work. That overhead is far
  larger than the per-symbol computation it buys.
* **When processes still make sense:** hard fault isolation. A worker that
  crashes takes down only its own task slots; the pool degrades those to
  missing results instead of propagating the crash.

### Portfolio aggregation: sequential vs. parallel

* For a handful of positions the sequential walk wins: fan-out overhead
  exceeds the per-position work. As position count grows, the per-position
  metrics (trailing volatility, full-history drawdown) dominate and the
  parallel strategy pulls ahead.
* Both strategies produce identical aggregated trees; the comparison is
  purely about cost, never about results.
"#
    )
}

/// Renders and writes the report file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let content = render_report(rows);
    std::fs::write(path, content)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    Ok(())
}
