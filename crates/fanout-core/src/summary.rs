//! Final pass/fail summary of a run

use std::io::Write;

use crate::error::FanoutResult;
use crate::task::ScriptTask;

/// Header printed above the list of failing scripts
pub const FAILURE_HEADER: &str = "Analysis failed in:";

/// Process exit code when every script succeeded
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code when at least one script failed
pub const EXIT_FAILURE: i32 = 1;

/// Outcome of a whole run, derived from the collected results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    total: usize,
    failures: Vec<ScriptTask>,
}

impl RunSummary {
    /// Build a summary; failures are sorted so reports are deterministic
    pub fn new(total: usize, mut failures: Vec<ScriptTask>) -> Self {
        failures.sort();
        Self { total, failures }
    }

    /// Summary of a run with nothing to do
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed(&self) -> usize {
        self.total.saturating_sub(self.failures.len())
    }

    /// Failing tasks, sorted by path
    pub fn failures(&self) -> &[ScriptTask] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            EXIT_SUCCESS
        } else {
            EXIT_FAILURE
        }
    }

    /// Write the failure section. Nothing is written on success.
    pub fn write_failure_report<W: Write>(&self, out: &mut W) -> FanoutResult<()> {
        if self.is_success() {
            return Ok(());
        }

        writeln!(out, "{}", FAILURE_HEADER)?;
        for task in &self.failures {
            writeln!(out, "  {}", task)?;
        }
        out.flush()?;
        Ok(())
    }
}
