//! Error types for fanout
//!
//! Every fallible operation in the core returns [`FanoutResult`]. Script
//! failures are not errors: a script that exits non-zero or cannot be
//! launched is recorded as a failed [`crate::task::ExecutionResult`]. Only
//! conditions that make the whole run impossible surface as [`FanoutError`].

mod constructors;
mod conversions;
mod types;

pub use types::{FanoutError, FanoutResult};
