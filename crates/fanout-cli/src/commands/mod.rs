//! CLI commands

pub mod discover;
pub mod list;
pub mod run;
