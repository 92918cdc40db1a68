//! Shared work queue drained by the worker pool
//!
//! Every task is enqueued before the first worker starts, so a worker that
//! sees an empty queue can stop for good: nothing will ever be added later.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::task::ScriptTask;

/// Mutex-guarded FIFO of pending tasks
#[derive(Debug, Default)]
pub struct WorkQueue {
    pending: Mutex<VecDeque<ScriptTask>>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task to the back of the queue
    pub fn enqueue(&self, task: ScriptTask) {
        self.pending.lock().push_back(task);
    }

    /// Remove and return the next task, or `None` once the queue is drained.
    ///
    /// Never waits for more work and never hands the same task to two callers.
    pub fn try_claim(&self) -> Option<ScriptTask> {
        self.pending.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl FromIterator<ScriptTask> for WorkQueue {
    fn from_iter<I: IntoIterator<Item = ScriptTask>>(iter: I) -> Self {
        Self {
            pending: Mutex::new(iter.into_iter().collect()),
        }
    }
}
