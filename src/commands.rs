//! CLI command definitions
//!
//! Defines the clap commands for the suite runner.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the suite (the default when no subcommand is given)
    Run(RunArgs),

    /// Show the resolved script list and which scripts exist
    List {
        /// Configuration file (default: ./suite-runner.toml, then the user config)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Scripts to run instead of the configured list
    pub scripts: Vec<String>,

    /// Configuration file (default: ./suite-runner.toml, then the user config)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Per-script timeout in seconds
    #[arg(long, short)]
    pub timeout: Option<u64>,

    /// Do not echo script output
    #[arg(long, short)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
