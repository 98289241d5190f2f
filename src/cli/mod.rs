//! Command dispatch
//!
//! Turns parsed commands into runs and returns the process exit code.

use std::time::Duration;

use crate::commands::{Commands, RunArgs};
use crate::common::config::Config;
use crate::common::Result;
use crate::suite::{self, report, Suite};

/// Execute a command, returning the exit code for the process
pub async fn dispatch(command: Commands) -> Result<i32> {
    match command {
        Commands::Run(args) => run(args).await,

        Commands::List { config } => {
            let config = Config::load(config.as_deref())?;
            let suite = Suite::from_config(&config);
            report::print_plan(&suite);
            Ok(0)
        }
    }
}

async fn run(args: RunArgs) -> Result<i32> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(args.config.as_deref())?;
    let mut suite = Suite::from_config(&config);

    if !args.scripts.is_empty() {
        suite = suite.with_scripts(args.scripts.as_slice());
    }
    if let Some(secs) = args.timeout {
        suite = suite.with_timeout(Duration::from_secs(secs))?;
    }
    if args.quiet {
        suite = suite.with_echo(false);
    }

    let summary = suite::run_and_report(&suite).await;
    Ok(summary.exit_code())
}
