//! Layered configuration loader

use std::path::{Path, PathBuf};

use super::env::overrides_from_env;
use super::types::{ConfigOverrides, RunnerConfig};
use crate::error::{FanoutError, FanoutResult};

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// JSON file that must exist
    File(PathBuf),
    /// JSON file that is skipped when absent
    OptionalFile(PathBuf),
    /// `FANOUT_*` environment variables
    Environment,
    /// Explicit values, typically from command line flags
    Overrides(ConfigOverrides),
}

/// Configuration loader with support for multiple sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add a file source that is ignored when the file does not exist
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::OptionalFile(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add explicit overrides
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    /// Merge every source over the defaults and validate the result
    pub fn load(self) -> FanoutResult<RunnerConfig> {
        let mut config = RunnerConfig::default();

        for source in self.sources {
            if let Some(layer) = load_from_source(source)? {
                config.merge(layer);
            }
        }

        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }
}

fn load_from_source(source: ConfigSource) -> FanoutResult<Option<ConfigOverrides>> {
    match source {
        ConfigSource::File(path) => {
            tracing::debug!("Loading config from file: {}", path.display());
            load_from_file(&path).map(Some)
        }
        ConfigSource::OptionalFile(path) => {
            if path.exists() {
                tracing::debug!("Loading config from file: {}", path.display());
                load_from_file(&path).map(Some)
            } else {
                tracing::trace!("No config file at {}", path.display());
                Ok(None)
            }
        }
        ConfigSource::Environment => {
            tracing::debug!("Loading config from environment");
            overrides_from_env().map(Some)
        }
        ConfigSource::Overrides(overrides) => {
            tracing::debug!("Applying command line overrides");
            Ok(Some(overrides))
        }
    }
}

fn load_from_file(path: &Path) -> FanoutResult<ConfigOverrides> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        FanoutError::io_with_path(
            format!("Failed to read config file: {}", e),
            path.display().to_string(),
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        FanoutError::config_with_context(
            format!("Invalid config file: {}", e),
            path.display().to_string(),
        )
    })
}
