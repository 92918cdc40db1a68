//! Task and result types shared by the queue, the pool and the aggregator

mod status;
mod types;

pub use status::{LAUNCH_FAILED_CODE, TaskStatus};
pub use types::{ExecutionResult, ExtraArgs, ScriptTask};
