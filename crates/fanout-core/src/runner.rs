//! Wires the queue, the worker pool and the aggregator into one run

use std::io::Write;
use std::thread;

use crate::aggregator::Aggregator;
use crate::error::FanoutResult;
use crate::executor::TaskExecutor;
use crate::pool::WorkerPool;
use crate::queue::WorkQueue;
use crate::summary::RunSummary;
use crate::task::{ExtraArgs, ScriptTask};

/// Run every task through `pool`, writing the transcript to `out`.
///
/// All tasks are queued before any worker starts. The aggregator runs on the
/// calling thread while the workers run in a scope around it, so this only
/// returns once every worker has exited. An empty task list returns success
/// without starting workers or writing anything.
pub fn run_tasks<E, W>(
    tasks: Vec<ScriptTask>,
    args: &ExtraArgs,
    pool: WorkerPool,
    executor: &E,
    out: W,
) -> FanoutResult<RunSummary>
where
    E: TaskExecutor + ?Sized,
    W: Write,
{
    let total = tasks.len();
    if total == 0 {
        tracing::info!("No scripts to run");
        return Ok(RunSummary::empty());
    }

    let queue: WorkQueue = tasks.into_iter().collect();
    let (results_tx, results_rx) = crossbeam_channel::unbounded();
    let aggregator = Aggregator::new(out, total);

    tracing::info!(tasks = total, workers = pool.size(), "Starting run");

    thread::scope(|scope| {
        pool.spawn(scope, &queue, args, executor, results_tx)?;
        aggregator.collect(&results_rx)
    })
}
