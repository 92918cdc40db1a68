//! Fanout CLI
//!
//! Runs every analysis script a build describes, one worker per CPU core,
//! then reports which ones failed.
//!
//! ```bash
//! fanout --out out/debug-x86-64
//! fanout --out out/debug-x86-64 --tree '//apps/sysui/*' -- --fatal-warnings
//! fanout --out out/debug-x86-64 --list
//! ```
//!
//! Exit status is 0 when every script passed, 1 when any script failed and
//! 2 when the run could not start at all.

mod args;
mod commands;
mod console;
mod router;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;
use crate::console::CliConsole;

/// Exit status for errors that stop the run before any script starts
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let console = CliConsole::new(cli.verbose);
    match router::route(cli, &console) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            console.error(&format!("{:#}", e));
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Logs go to stderr so they never interleave with the script transcript.
/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("fanout=debug,fanout_core=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
