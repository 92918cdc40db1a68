//! Default command: run every discovered script and report failures

use std::io;

use anyhow::Result;
use fanout_core::{ExtraArgs, ProcessExecutor, WorkerPool, run_tasks};

use super::discover::{discover_scripts, load_config};
use crate::args::Cli;
use crate::console::CliConsole;

pub fn execute(cli: Cli, console: &CliConsole) -> Result<u8> {
    let config = load_config(&cli)?;
    let scripts = discover_scripts(&cli, &config)?;

    let pool = WorkerPool::new(config.effective_jobs());
    console.info(&format!(
        "Running {} analysis scripts on {} workers",
        scripts.len(),
        pool.size()
    ));

    let args = ExtraArgs::new(cli.extra);
    let summary = run_tasks(
        scripts,
        &args,
        pool,
        &ProcessExecutor::new(),
        io::stdout().lock(),
    )?;

    console.info(&format!(
        "{} passed, {} failed",
        summary.passed(),
        summary.failures().len()
    ));
    Ok(summary.exit_code() as u8)
}
