//! Environment variable configuration layer

use std::path::PathBuf;

use super::types::ConfigOverrides;
use crate::error::{FanoutError, FanoutResult};

pub const ENV_ROOT: &str = "FANOUT_ROOT";
pub const ENV_GN: &str = "FANOUT_GN";
pub const ENV_GENERATOR: &str = "FANOUT_GENERATOR";
pub const ENV_JOBS: &str = "FANOUT_JOBS";
pub const ENV_DESCRIPTION: &str = "FANOUT_DESCRIPTION";

/// Read overrides from the process environment
pub fn overrides_from_env() -> FanoutResult<ConfigOverrides> {
    overrides_from_lookup(|key| std::env::var(key).ok())
}

/// Read overrides through `lookup`; empty values count as unset
pub fn overrides_from_lookup<F>(lookup: F) -> FanoutResult<ConfigOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let jobs = match get(ENV_JOBS) {
        Some(value) => Some(value.trim().parse::<usize>().map_err(|e| {
            FanoutError::config_with_context(
                format!("Invalid {} value '{}': {}", ENV_JOBS, value, e),
                "environment",
            )
        })?),
        None => None,
    };

    Ok(ConfigOverrides {
        root: get(ENV_ROOT).map(PathBuf::from),
        gn: get(ENV_GN),
        generator: get(ENV_GENERATOR),
        jobs,
        description_file: get(ENV_DESCRIPTION).map(PathBuf::from),
    })
}
