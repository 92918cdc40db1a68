//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::Parser;
use fanout_core::ConfigOverrides;
use fanout_core::targets::DEFAULT_TREE;

#[derive(Parser, Debug)]
#[command(name = "fanout")]
#[command(about = "Run build analysis scripts in parallel")]
#[command(
    long_about = r#"Run build analysis scripts in parallel

Asks the build description for every analysis action, runs the generated
scripts on a pool of worker threads and prints each script's output as it
finishes. Arguments after the known options (or after `--`) are passed to
every script. Flags that share a name with fanout's own options, such as
-v, -j or --list, are only forwarded when they follow `--`.

There is no per-script timeout: a script that never exits stalls the run."#
)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Path to the base output directory, e.g. out/debug-x86-64
    #[arg(long)]
    pub out: PathBuf,

    /// Restrict analysis to a source subtree, e.g. //apps/sysui/*
    #[arg(long, default_value = DEFAULT_TREE)]
    pub tree: String,

    /// Source root that `//` paths are resolved against [default: .]
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Build description command [default: gn]
    #[arg(long)]
    pub gn: Option<String>,

    /// Generator script that marks a target as an analysis script
    #[arg(long)]
    pub generator: Option<String>,

    /// Number of worker threads [default: number of CPU cores]
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Read a saved `gn desc --format=json` description instead of running gn
    #[arg(long = "description")]
    pub description_file: Option<PathBuf>,

    /// Path to a JSON configuration file [default: ./fanout.json if present]
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Print the discovered scripts and exit without running them
    #[arg(long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Extra arguments passed verbatim to every script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

impl Cli {
    /// Configuration values given on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root: self.root.clone(),
            gn: self.gn.clone(),
            generator: self.generator.clone(),
            jobs: self.jobs,
            description_file: self.description_file.clone(),
        }
    }
}
