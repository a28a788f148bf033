pub mod process_pool;
pub mod profile;
pub mod strategies;

pub use process_pool::{
    default_workers, serve_worker, IndexedTask, ProcessPool, WorkerBatch, WorkerCommand,
};
pub use profile::{profile_parallelism, ParallelProfile};
pub use strategies::{
    rows_match, run_process, run_sequential, run_threaded, split_by_symbol, SymbolSeries,
};
