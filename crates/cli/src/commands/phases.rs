//! The individual analysis phases, shared between `run` and the
//! phase-specific subcommands.

use anyhow::{Context, Result};
use quantbench_analytics::{profile_rolling, RollingProfile};
use quantbench_core::{AppConfig, ConfigLoader, PriceHistoryIndex};
use quantbench_data::{load_dataframe, load_records, profile_ingestion, IngestionProfile};
use quantbench_parallel::{profile_parallelism, ParallelProfile, ProcessPool, WorkerCommand};
use quantbench_portfolio::{profile_portfolio, PortfolioProfile};
use std::path::{Path, PathBuf};

/// Builds a process pool that re-invokes this binary as a hidden worker
/// subcommand.
pub fn worker_pool(kind: &str, workers: Option<usize>) -> Result<ProcessPool> {
    let program = std::env::current_exe().context("cannot locate own executable for workers")?;
    Ok(ProcessPool::new(
        WorkerCommand {
            program,
            args: vec!["worker".to_string(), kind.to_string()],
        },
        workers,
    ))
}

pub fn data_path(config: &AppConfig, flag: Option<String>) -> PathBuf {
    PathBuf::from(flag.unwrap_or_else(|| config.data.market_data_path.clone()))
}

pub fn portfolio_path(config: &AppConfig, flag: Option<String>) -> PathBuf {
    PathBuf::from(flag.unwrap_or_else(|| config.data.portfolio_path.clone()))
}

pub fn ingest(config: &AppConfig, path: &Path) -> Result<IngestionProfile> {
    profile_ingestion(path, config.data.ingest_iterations)
}

pub fn rolling(config: &AppConfig, path: &Path) -> Result<RollingProfile> {
    let records = load_records(path)?;
    let frame = load_dataframe(path)?;
    profile_rolling(&records, &frame, config.analytics.window)
}

pub fn parallelism(config: &AppConfig, path: &Path) -> Result<ParallelProfile> {
    let records = load_records(path)?;
    let pool = worker_pool("rolling", config.parallel.workers)?;
    profile_parallelism(&records, config.analytics.window, &pool)
}

pub fn portfolio(
    config: &AppConfig,
    path: &Path,
    portfolio_file: &Path,
) -> Result<PortfolioProfile> {
    let records = load_records(path)?;
    let index = PriceHistoryIndex::from_records(&records);
    let pool = worker_pool("position", config.parallel.workers)?;
    Ok(profile_portfolio(portfolio_file, &index, Some(&pool)))
}

pub fn ingest_only(data: Option<String>) -> Result<()> {
    let config = ConfigLoader::load()?;
    ingest(&config, &data_path(&config, data))?;
    Ok(())
}

pub fn rolling_only(data: Option<String>) -> Result<()> {
    let config = ConfigLoader::load()?;
    rolling(&config, &data_path(&config, data))?;
    Ok(())
}

pub fn parallelism_only(data: Option<String>) -> Result<()> {
    let config = ConfigLoader::load()?;
    parallelism(&config, &data_path(&config, data))?;
    Ok(())
}

pub fn portfolio_only(data: Option<String>, portfolio_file: Option<String>) -> Result<()> {
    let config = ConfigLoader::load()?;
    let profile = portfolio(
        &config,
        &data_path(&config, data),
        &portfolio_path(&config, portfolio_file),
    )?;
    if let Some(result) = &profile.result {
        println!("{}", serde_json::to_string_pretty(result)?);
    }
    Ok(())
}
