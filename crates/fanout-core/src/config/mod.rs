//! Runner configuration
//!
//! Settings come from several layers, later ones overriding earlier ones:
//! built-in defaults, an optional JSON file, `FANOUT_*` environment
//! variables and finally command line flags.

mod env;
mod loader;
mod types;

pub use env::{
    ENV_DESCRIPTION, ENV_GENERATOR, ENV_GN, ENV_JOBS, ENV_ROOT, overrides_from_env,
    overrides_from_lookup,
};
pub use loader::{ConfigLoader, ConfigSource};
pub use types::{
    CONFIG_FILE_NAME, ConfigOverrides, DEFAULT_GENERATOR, DEFAULT_GN, RunnerConfig,
};
