pub mod generate;
pub mod phases;
pub mod run;
pub mod worker;

pub use worker::WorkerKind;
