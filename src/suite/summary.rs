//! Aggregation of execution records into the final report numbers

use super::record::{ExecutionRecord, Outcome};

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Scripts actually attempted (missing files excluded)
    pub total: usize,
    pub passed: usize,
    /// Failed identifiers in execution order, timeouts included
    pub failed: Vec<String>,
    /// Subset of `failed` that hit the timeout
    pub timed_out: Vec<String>,
    /// Scripts whose file was not found
    pub skipped: Vec<String>,
}

impl Summary {
    pub fn from_records(records: &[ExecutionRecord]) -> Self {
        let mut summary = Self::default();

        for record in records {
            match &record.outcome {
                Outcome::Skipped => {
                    summary.skipped.push(record.script.clone());
                    continue;
                }
                Outcome::Passed => summary.passed += 1,
                Outcome::TimedOut { .. } => {
                    summary.timed_out.push(record.script.clone());
                    summary.failed.push(record.script.clone());
                }
                Outcome::Failed { .. } | Outcome::LaunchFailed { .. } => {
                    summary.failed.push(record.script.clone());
                }
            }
            summary.total += 1;
        }

        summary
    }

    /// Fraction of attempted scripts that passed, `None` when nothing ran
    pub fn pass_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.passed as f64 / self.total as f64)
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

/// Render a pass rate as a percentage with one decimal, or `N/A`
pub fn format_pass_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "N/A".to_string(),
    }
}
