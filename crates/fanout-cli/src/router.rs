//! Command routing logic for CLI

use anyhow::Result;

use crate::args::Cli;
use crate::commands;
use crate::console::CliConsole;

/// Dispatch to the requested command and return the process exit code
pub fn route(cli: Cli, console: &CliConsole) -> Result<u8> {
    if cli.list {
        commands::list::execute(&cli, console)
    } else {
        commands::run::execute(cli, console)
    }
}
