//! Per-script execution records

use std::path::PathBuf;
use std::time::Duration;

/// How a single script invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exited with status 0 within the timeout
    Passed,
    /// Exited with a non-zero status; `None` when killed by a signal
    Failed { exit_code: Option<i32> },
    /// Ran past the timeout and was terminated
    TimedOut { limit: Duration },
    /// Could not be launched or waited on
    LaunchFailed { reason: String },
    /// Script file does not exist
    Skipped,
}

/// Result of running one script
#[derive(Debug, Clone)]
pub struct ExecutionRecord {
    /// Identifier as configured
    pub script: String,
    /// Path the identifier resolved to
    pub path: PathBuf,
    pub stdout: String,
    pub stderr: String,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl ExecutionRecord {
    /// Record for a script whose file is missing
    pub fn skipped(script: &str, path: PathBuf) -> Self {
        Self {
            script: script.to_string(),
            path,
            stdout: String::new(),
            stderr: String::new(),
            outcome: Outcome::Skipped,
            elapsed: Duration::ZERO,
        }
    }

    pub fn success(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    pub fn timed_out(&self) -> bool {
        matches!(self.outcome, Outcome::TimedOut { .. })
    }

    /// Missing scripts are warnings and stay out of the totals
    pub fn counts_toward_total(&self) -> bool {
        self.outcome != Outcome::Skipped
    }
}
