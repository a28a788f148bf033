pub mod config;
pub mod config_loader;
pub mod price_index;
pub mod records;
pub mod rounding;

pub use config::{AnalyticsConfig, AppConfig, DataConfig, ParallelConfig, ReportConfig};
pub use config_loader::ConfigLoader;
pub use price_index::{LatestQuote, PriceHistoryIndex};
pub use records::PriceRecord;
pub use rounding::round_to;
