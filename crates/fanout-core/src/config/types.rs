//! Configuration data types

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{FanoutError, FanoutResult};
use crate::pool::default_pool_size;

/// Config file picked up from the working directory when present
pub const CONFIG_FILE_NAME: &str = "fanout.json";

/// Command used to describe the build graph
pub const DEFAULT_GN: &str = "gn";

/// Generator script that marks a target as a runnable analysis script
pub const DEFAULT_GENERATOR: &str = "//build/dart/gen_analyzer_invocation.py";

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Source root that `//`-relative outputs are resolved against
    pub root: PathBuf,
    /// Build description command
    pub gn: String,
    /// Generator marker for runnable targets
    pub generator: String,
    /// Worker count; `None` means one per CPU core
    pub jobs: Option<usize>,
    /// Pre-generated description to read instead of invoking `gn`
    pub description_file: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            gn: DEFAULT_GN.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
            jobs: None,
            description_file: None,
        }
    }
}

impl RunnerConfig {
    /// Apply every field that is set in `overrides`
    pub fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(root) = overrides.root {
            self.root = root;
        }
        if let Some(gn) = overrides.gn {
            self.gn = gn;
        }
        if let Some(generator) = overrides.generator {
            self.generator = generator;
        }
        if overrides.jobs.is_some() {
            self.jobs = overrides.jobs;
        }
        if overrides.description_file.is_some() {
            self.description_file = overrides.description_file;
        }
    }

    pub fn validate(&self) -> FanoutResult<()> {
        if self.jobs == Some(0) {
            return Err(FanoutError::invalid_field("jobs", "must be at least 1"));
        }
        if self.gn.trim().is_empty() {
            return Err(FanoutError::invalid_field("gn", "must not be empty"));
        }
        if self.generator.trim().is_empty() {
            return Err(FanoutError::invalid_field("generator", "must not be empty"));
        }
        Ok(())
    }

    /// Worker count to use for this run
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(default_pool_size)
    }
}

/// A partial configuration layer; unset fields leave the lower layer alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub root: Option<PathBuf>,
    pub gn: Option<String>,
    pub generator: Option<String>,
    pub jobs: Option<usize>,
    pub description_file: Option<PathBuf>,
}
