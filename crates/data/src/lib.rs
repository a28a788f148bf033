pub mod csv_loader;
pub mod error;
pub mod frame_loader;
pub mod profile;
pub mod synthetic;

pub use csv_loader::{load_records, write_records};
pub use error::DataError;
pub use frame_loader::load_dataframe;
pub use profile::{profile_ingestion, IngestionProfile};
pub use synthetic::{generate_records, SyntheticConfig};
