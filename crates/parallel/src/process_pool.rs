//! A fixed-size pool of OS-process workers.
//!
//! Tasks are serialized to JSON, fanned out to child processes over stdin,
//! and read back from stdout tagged with their original indices. The tag is
//! what makes collection order irrelevant: results are reassembled into
//! task order no matter which child finishes first.
//!
//! Failure isolation is the point of paying the serialization cost: a child
//! that crashes, exits nonzero, or emits garbage loses only its own task
//! slots (left as `None` for the caller to substitute), never the batch.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{debug, error, warn};

/// Command line used to spawn one worker child.
#[derive(Debug, Clone)]
pub struct WorkerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// The batch one child receives: shared read-only context plus its tagged
/// slice of the task list.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkerBatch<C, T> {
    pub context: C,
    pub tasks: Vec<IndexedTask<T>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexedTask<T> {
    pub index: usize,
    pub task: T,
}

// Serialize-only twin of `WorkerBatch` so the parent never has to clone a
// potentially large context per batch.
#[derive(Serialize)]
struct BatchRef<'a, C, T> {
    context: &'a C,
    tasks: Vec<IndexedTask<T>>,
}

#[must_use]
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

pub struct ProcessPool {
    command: WorkerCommand,
    workers: usize,
}

impl ProcessPool {
    /// Creates a pool spawning `command` for each worker. `None` workers
    /// uses the host's available logical CPU count.
    #[must_use]
    pub fn new(command: WorkerCommand, workers: Option<usize>) -> Self {
        let workers = workers.unwrap_or_else(default_workers).max(1);
        Self { command, workers }
    }

    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fans `tasks` out across up to `workers` children and reassembles the
    /// results by task index.
    ///
    /// Every spawned child is waited on before this returns, on success and
    /// failure paths alike. A failed child leaves `None` at its slots.
    ///
    /// # Errors
    ///
    /// Returns an error only if a batch cannot be serialized; per-child
    /// failures degrade to `None` results instead.
    pub fn execute<C, T, R>(&self, context: &C, tasks: Vec<T>) -> Result<Vec<Option<R>>>
    where
        C: Serialize,
        T: Serialize,
        R: DeserializeOwned,
    {
        let total = tasks.len();
        let mut results: Vec<Option<R>> = (0..total).map(|_| None).collect();
        if total == 0 {
            return Ok(results);
        }

        let chunk_size = total.div_ceil(self.workers);
        let mut indexed: Vec<IndexedTask<T>> = tasks
            .into_iter()
            .enumerate()
            .map(|(index, task)| IndexedTask { index, task })
            .collect();

        // Serialize every batch up front so no fallible step remains once
        // children start running.
        let mut batches: Vec<(Vec<u8>, Vec<usize>)> = Vec::new();
        while !indexed.is_empty() {
            let rest = indexed.split_off(chunk_size.min(indexed.len()));
            let chunk = std::mem::replace(&mut indexed, rest);
            let indices: Vec<usize> = chunk.iter().map(|t| t.index).collect();
            let payload = serde_json::to_vec(&BatchRef {
                context,
                tasks: chunk,
            })
            .context("failed to serialize worker batch")?;
            batches.push((payload, indices));
        }
        debug!(
            batches = batches.len(),
            workers = self.workers,
            tasks = total,
            "dispatching to process pool"
        );

        let mut children: Vec<(Child, Vec<usize>)> = Vec::new();
        for (payload, indices) in batches {
            match self.spawn_worker(&payload) {
                Ok(child) => children.push((child, indices)),
                Err(e) => {
                    error!(error = %e, tasks = indices.len(), "failed to start worker; its tasks have no results");
                }
            }
        }

        for (child, indices) in children {
            collect_child_output(child, &indices, &mut results);
        }

        Ok(results)
    }

    fn spawn_worker(&self, payload: &[u8]) -> Result<Child> {
        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!("failed to spawn worker: {}", self.command.program.display())
            })?;

        // Children read all of stdin before writing anything, so this write
        // cannot deadlock against an unfilled stdout pipe.
        let mut stdin = child
            .stdin
            .take()
            .context("worker child has no stdin handle")?;
        if let Err(e) = stdin.write_all(payload) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e).context("failed to write batch to worker stdin");
        }
        drop(stdin);

        Ok(child)
    }
}

fn collect_child_output<R: DeserializeOwned>(
    child: Child,
    indices: &[usize],
    results: &mut [Option<R>],
) {
    let output = match child.wait_with_output() {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "failed to collect worker output");
            return;
        }
    };

    if !output.status.success() {
        warn!(status = %output.status, tasks = indices.len(), "worker exited abnormally; its tasks have no results");
        return;
    }

    let tagged: Vec<IndexedTask<R>> = match serde_json::from_slice(&output.stdout) {
        Ok(tagged) => tagged,
        Err(e) => {
            warn!(error = %e, tasks = indices.len(), "worker produced unparseable output; its tasks have no results");
            return;
        }
    };

    for item in tagged {
        match results.get_mut(item.index) {
            Some(slot) => *slot = Some(item.task),
            None => warn!(index = item.index, "worker returned an out-of-range task index"),
        }
    }
}

/// Runs the child side of the protocol: reads one batch from stdin, applies
/// `work` to each task, writes tagged results to stdout.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the batch is malformed; the
/// caller should exit nonzero so the parent records the failure.
pub fn serve_worker<C, T, R>(work: impl Fn(&C, T) -> R) -> Result<()>
where
    C: DeserializeOwned,
    T: DeserializeOwned,
    R: Serialize,
{
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read task batch from stdin")?;
    let batch: WorkerBatch<C, T> =
        serde_json::from_str(&input).context("malformed worker batch on stdin")?;

    let results: Vec<IndexedTask<R>> = batch
        .tasks
        .into_iter()
        .map(|t| IndexedTask {
            index: t.index,
            task: work(&batch.context, t.task),
        })
        .collect();

    let stdout = std::io::stdout();
    serde_json::to_writer(stdout.lock(), &results).context("failed to write worker results")?;
    Ok(())
}
