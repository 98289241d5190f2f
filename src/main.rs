//! Suite runner CLI
//!
//! With no arguments, runs the configured suite and exits 0 only if every
//! script passed.

use clap::Parser;
use suite_runner::cli;
use suite_runner::commands::{Commands, RunArgs};
use suite_runner::common::logging;

#[derive(Parser)]
#[command(name = "suite-runner", about = "Sequential end-to-end scenario runner")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Run(RunArgs::default()));

    match cli::dispatch(command).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
