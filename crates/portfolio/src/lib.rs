pub mod aggregate;
pub mod error;
pub mod metrics;
pub mod model;
pub mod strategy;
pub mod tree;

pub use aggregate::aggregate;
pub use error::PortfolioError;
pub use metrics::{compute_position_metrics, VOLATILITY_WINDOW};
pub use model::{load_portfolio, trees_match, PortfolioNode, Position};
pub use strategy::{
    profile_portfolio, run_multiprocess, run_parallel, run_sequential, PortfolioProfile,
};
pub use tree::{flatten, rebind};
