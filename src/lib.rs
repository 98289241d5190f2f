//! Suite runner - sequential executor for end-to-end scenario scripts
//!
//! Runs a fixed, ordered list of scripts as isolated child processes with a
//! per-script timeout and reports pass/fail counts.

pub mod cli;
pub mod commands;
pub mod common;
pub mod suite;
pub mod supervisor;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use suite::{ExecutionRecord, Outcome, Suite, Summary};
