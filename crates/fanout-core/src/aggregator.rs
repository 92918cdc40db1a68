//! Collects results from the worker pool into one transcript and summary
//!
//! The aggregator is the single point where parallel work rejoins. Output
//! appears in arrival order, while the failure list is sorted before it is
//! reported.

use std::io::Write;

use crossbeam_channel::Receiver;

use crate::error::{FanoutError, FanoutResult};
use crate::summary::RunSummary;
use crate::task::{ExecutionResult, ScriptTask};

/// Line written before each script's output
pub const SEPARATOR: &str = "----------------------------------------------------------";

/// Receives exactly `total` results, echoing each one to `out`
pub struct Aggregator<W: Write> {
    out: W,
    total: usize,
    received: usize,
    failures: Vec<ScriptTask>,
}

impl<W: Write> Aggregator<W> {
    /// `total` must be the number of tasks enqueued before the workers start
    pub fn new(out: W, total: usize) -> Self {
        Self {
            out,
            total,
            received: 0,
            failures: Vec::new(),
        }
    }

    pub fn received(&self) -> usize {
        self.received
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Block until every expected result has arrived, then write the report.
    ///
    /// Fails with [`FanoutError::ResultChannelClosed`] if all senders hang
    /// up early, rather than waiting forever.
    pub fn collect(mut self, results: &Receiver<ExecutionResult>) -> FanoutResult<RunSummary> {
        while self.received < self.total {
            let result = results
                .recv()
                .map_err(|_| FanoutError::ResultChannelClosed {
                    received: self.received,
                    expected: self.total,
                })?;
            self.record(result)?;
        }

        self.finish()
    }

    /// Echo one result and note whether it failed
    pub fn record(&mut self, result: ExecutionResult) -> FanoutResult<()> {
        self.received += 1;
        tracing::debug!(
            script = %result.task,
            status = %result.status,
            received = self.received,
            total = self.total,
            "Result received"
        );

        writeln!(self.out, "{}", SEPARATOR)?;
        self.out.write_all(&result.output)?;
        writeln!(self.out)?;
        self.out.flush()?;

        if !result.is_success() {
            self.failures.push(result.task);
        }
        Ok(())
    }

    /// Write the failure section and produce the summary
    pub fn finish(mut self) -> FanoutResult<RunSummary> {
        let summary = RunSummary::new(self.received, self.failures);
        summary.write_failure_report(&mut self.out)?;
        tracing::info!(
            total = summary.total(),
            failed = summary.failures().len(),
            "Run complete"
        );
        Ok(summary)
    }
}
