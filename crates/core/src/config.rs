use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub analytics: AnalyticsConfig,
    pub parallel: ParallelConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub market_data_path: String,
    pub portfolio_path: String,
    /// How many timed repetitions each ingestion engine gets.
    pub ingest_iterations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Worker count for the pooled strategies. `None` uses the host's
    /// available logical CPU count.
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                market_data_path: "data/market_data.csv".to_string(),
                portfolio_path: "data/portfolio_structure.json".to_string(),
                ingest_iterations: 3,
            },
            analytics: AnalyticsConfig { window: 20 },
            parallel: ParallelConfig { workers: None },
            report: ReportConfig {
                output_path: "performance_report.md".to_string(),
            },
        }
    }
}
