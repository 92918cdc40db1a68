//! Fixed-size pool of worker threads draining the work queue
//!
//! Workers are plain OS threads: each one blocks on its child process, so
//! there is nothing to gain from cooperative scheduling here.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, Scope, ScopedJoinHandle};

use crossbeam_channel::Sender;
use parking_lot::{Condvar, Mutex};

use crate::error::{FanoutError, FanoutResult};
use crate::executor::TaskExecutor;
use crate::queue::WorkQueue;
use crate::task::{ExecutionResult, ExtraArgs, ScriptTask};

/// Number of workers used when none is configured
pub fn default_pool_size() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// A fixed number of workers, each running tasks until the queue is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    size: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(default_pool_size())
    }
}

impl WorkerPool {
    /// Create a pool with `size` workers (at least one)
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Start every worker inside `scope` and return their handles.
    ///
    /// No worker claims a task until all of them have been started. Each
    /// worker holds a clone of `results`; the original is dropped here, so
    /// the channel disconnects once the last worker exits.
    pub fn spawn<'scope, 'env, E>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        queue: &'env WorkQueue,
        args: &'env ExtraArgs,
        executor: &'env E,
        results: Sender<ExecutionResult>,
    ) -> FanoutResult<Vec<ScopedJoinHandle<'scope, usize>>>
    where
        E: TaskExecutor + ?Sized,
    {
        let gate = Arc::new(StartGate::default());
        // Opens on every exit path, so workers started before a spawn
        // failure still drain the queue.
        let _open_on_exit = GateOpener(Arc::clone(&gate));
        let mut handles = Vec::with_capacity(self.size);

        for id in 0..self.size {
            let results = results.clone();
            let gate = Arc::clone(&gate);
            let handle = thread::Builder::new()
                .name(format!("fanout-worker-{}", id))
                .spawn_scoped(scope, move || {
                    gate.wait();
                    worker_loop(id, queue, args, executor, results)
                })
                .map_err(|e| {
                    FanoutError::io(format!("Failed to start worker thread {}: {}", id, e))
                })?;
            handles.push(handle);
        }

        tracing::debug!(workers = self.size, "Worker pool started");
        Ok(handles)
    }
}

/// Holds workers back until the whole pool has been started
#[derive(Default)]
struct StartGate {
    open: Mutex<bool>,
    opened: Condvar,
}

impl StartGate {
    fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.opened.wait(&mut open);
        }
    }

    fn open(&self) {
        *self.open.lock() = true;
        self.opened.notify_all();
    }
}

/// Opens the gate when dropped
struct GateOpener(Arc<StartGate>);

impl Drop for GateOpener {
    fn drop(&mut self) {
        self.0.open();
    }
}

/// Claim and run tasks until the queue is drained. Returns the number run.
fn worker_loop<E>(
    id: usize,
    queue: &WorkQueue,
    args: &ExtraArgs,
    executor: &E,
    results: Sender<ExecutionResult>,
) -> usize
where
    E: TaskExecutor + ?Sized,
{
    let mut completed = 0;

    while let Some(task) = queue.try_claim() {
        tracing::trace!(worker = id, script = %task, "Claimed task");
        let result = execute_guarded(executor, &task, args);

        if results.send(result).is_err() {
            tracing::warn!(worker = id, "Result receiver dropped, stopping worker");
            break;
        }
        completed += 1;
    }

    tracing::debug!(worker = id, completed, "Worker finished");
    completed
}

/// Run a task, turning a panicking executor into a failed result so the
/// claimed task still reports exactly once.
fn execute_guarded<E>(executor: &E, task: &ScriptTask, args: &ExtraArgs) -> ExecutionResult
where
    E: TaskExecutor + ?Sized,
{
    panic::catch_unwind(AssertUnwindSafe(|| executor.execute(task, args))).unwrap_or_else(
        |payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "executor panicked".to_string());
            tracing::error!(script = %task, "Executor panicked: {}", reason);
            ExecutionResult::launch_failed(task.clone(), reason)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Records which threads ran tasks and how many ran at once
    #[derive(Default)]
    struct TrackingExecutor {
        running: AtomicUsize,
        peak: AtomicUsize,
        threads: Mutex<HashSet<String>>,
    }

    impl TaskExecutor for TrackingExecutor {
        fn execute(&self, task: &ScriptTask, _args: &ExtraArgs) -> ExecutionResult {
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if let Some(name) = thread::current().name() {
                self.threads.lock().insert(name.to_string());
            }
            thread::sleep(Duration::from_millis(20));
            self.running.fetch_sub(1, Ordering::SeqCst);
            ExecutionResult::new(task.clone(), TaskStatus::Exited(0), Vec::new())
        }
    }

    struct PanickingExecutor;

    impl TaskExecutor for PanickingExecutor {
        fn execute(&self, task: &ScriptTask, _args: &ExtraArgs) -> ExecutionResult {
            if task.path().ends_with("boom") {
                panic!("boom");
            }
            ExecutionResult::new(task.clone(), TaskStatus::Exited(0), Vec::new())
        }
    }

    fn queue_of(n: usize) -> WorkQueue {
        (0..n).map(|i| ScriptTask::new(format!("task-{}", i))).collect()
    }

    #[test]
    fn test_pool_size_is_at_least_one() {
        assert_eq!(WorkerPool::new(0).size(), 1);
        assert_eq!(WorkerPool::new(4).size(), 4);
        assert!(WorkerPool::default().size() >= 1);
    }

    #[test]
    fn test_concurrency_bounded_by_pool_size() {
        let queue = queue_of(5);
        let args = ExtraArgs::default();
        let executor = TrackingExecutor::default();
        let (tx, rx) = crossbeam_channel::unbounded();

        let completed: usize = thread::scope(|scope| {
            let handles = WorkerPool::new(2)
                .spawn(scope, &queue, &args, &executor, tx)
                .unwrap();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(completed, 5);
        assert_eq!(rx.try_iter().count(), 5);
        assert!(executor.peak.load(Ordering::SeqCst) <= 2);
        assert!(executor.threads.lock().len() <= 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_channel_disconnects_after_workers_exit() {
        let queue = queue_of(3);
        let args = ExtraArgs::default();
        let executor = TrackingExecutor::default();
        let (tx, rx) = crossbeam_channel::unbounded();

        thread::scope(|scope| {
            WorkerPool::new(3)
                .spawn(scope, &queue, &args, &executor, tx)
                .unwrap();
        });

        assert_eq!(rx.iter().count(), 3);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_panicking_executor_still_reports() {
        let queue: WorkQueue = ["a", "boom", "c"].into_iter().map(ScriptTask::from).collect();
        let args = ExtraArgs::default();
        let (tx, rx) = crossbeam_channel::unbounded();

        thread::scope(|scope| {
            WorkerPool::new(1)
                .spawn(scope, &queue, &args, &PanickingExecutor, tx)
                .unwrap();
        });

        let results: Vec<_> = rx.iter().collect();
        assert_eq!(results.len(), 3);
        let failed: Vec<_> = results.iter().filter(|r| !r.is_success()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].task, ScriptTask::from("boom"));
        assert_eq!(failed[0].status, TaskStatus::LaunchFailed);
    }
}
