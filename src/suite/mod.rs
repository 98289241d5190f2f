//! Sequential scenario suite
//!
//! Runs each configured script as an isolated child process, records how
//! it ended and aggregates the records into a final report.

mod plan;
mod record;
pub mod report;
mod runner;
mod summary;

pub use plan::{Launcher, ScriptEntry, Suite};
pub use record::{ExecutionRecord, Outcome};
pub use runner::{run_and_report, run_script, run_suite};
pub use summary::{format_pass_rate, Summary};
