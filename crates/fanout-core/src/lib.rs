//! Fanout core library
//!
//! Runs a set of external analysis scripts across a fixed pool of worker
//! threads and folds their results into one transcript and a pass/fail
//! summary.
//!
//! # Data flow
//!
//! ```text
//! TargetSource -> ScriptSelector -> WorkQueue -> WorkerPool -> channel -> Aggregator -> RunSummary
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use fanout_core::{ExtraArgs, ProcessExecutor, ScriptTask, WorkerPool, run_tasks};
//!
//! let tasks = vec![ScriptTask::from("/src/out/gen/foo_analysis.sh")];
//! let summary = run_tasks(
//!     tasks,
//!     &ExtraArgs::default(),
//!     WorkerPool::default(),
//!     &ProcessExecutor::new(),
//!     std::io::stdout(),
//! )?;
//! std::process::exit(summary.exit_code());
//! # Ok::<(), fanout_core::FanoutError>(())
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod executor;
pub mod pool;
pub mod queue;
pub mod runner;
pub mod summary;
pub mod targets;
pub mod task;

// Re-exports for convenience
pub use aggregator::{Aggregator, SEPARATOR};
pub use config::{ConfigLoader, ConfigOverrides, RunnerConfig};
pub use error::{FanoutError, FanoutResult};
pub use executor::{ProcessExecutor, TaskExecutor};
pub use pool::{WorkerPool, default_pool_size};
pub use queue::WorkQueue;
pub use runner::run_tasks;
pub use summary::{EXIT_FAILURE, EXIT_SUCCESS, FAILURE_HEADER, RunSummary};
pub use targets::{
    DescriptionFile, GnDescribe, ScriptSelector, TargetSource, enumerate_scripts,
};
pub use task::{ExecutionResult, ExtraArgs, ScriptTask, TaskStatus};
