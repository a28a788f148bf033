pub mod profile;
pub mod rolling;
pub mod stats;
pub mod vectorized;

pub use profile::{profile_rolling, RollingProfile};
pub use rolling::{compute_rolling_rows, RollingRow};
pub use stats::{compute_drawdown, sample_std, trailing_return_volatility};
pub use vectorized::compute_rolling_frame;
