//! Configuration loading and script discovery shared by the commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fanout_core::config::CONFIG_FILE_NAME;
use fanout_core::{
    ConfigLoader, DescriptionFile, GnDescribe, RunnerConfig, ScriptSelector, ScriptTask,
    TargetSource, enumerate_scripts,
};

use crate::args::Cli;

/// Layer defaults, config file, environment and flags
pub fn load_config(cli: &Cli) -> Result<RunnerConfig> {
    let loader = match &cli.config_file {
        Some(path) => ConfigLoader::new().with_file(path),
        None => ConfigLoader::new().with_optional_file(CONFIG_FILE_NAME),
    };

    let mut config = loader
        .with_env()
        .with_overrides(cli.overrides())
        .load()
        .context("Failed to load configuration")?;

    config.root = absolute(&config.root)?;
    Ok(config)
}

/// Ask the configured source for the build description and pick the scripts
pub fn discover_scripts(cli: &Cli, config: &RunnerConfig) -> Result<Vec<ScriptTask>> {
    let source: Box<dyn TargetSource> = match &config.description_file {
        Some(path) => Box::new(DescriptionFile::new(path)),
        None => Box::new(GnDescribe::new(
            config.gn.clone(),
            config.root.clone(),
            cli.out.clone(),
            cli.tree.clone(),
        )),
    };
    let selector = ScriptSelector::new(config.generator.clone(), config.root.clone());

    enumerate_scripts(source.as_ref(), &selector).context("Failed to enumerate analysis scripts")
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve source root {}", path.display()))
}
