//! `--list`: print discovered scripts without running them

use std::io::{self, Write};

use anyhow::Result;

use super::discover::{discover_scripts, load_config};
use crate::args::Cli;
use crate::console::CliConsole;

pub fn execute(cli: &Cli, console: &CliConsole) -> Result<u8> {
    let config = load_config(cli)?;
    let scripts = discover_scripts(cli, &config)?;
    console.info(&format!("Found {} analysis scripts", scripts.len()));

    let mut out = io::stdout().lock();
    for script in &scripts {
        writeln!(out, "{}", script)?;
    }
    out.flush()?;
    Ok(0)
}
