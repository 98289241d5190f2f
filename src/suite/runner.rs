//! Sequential runner
//!
//! Scripts run strictly one after another. Each one is launched, awaited to
//! completion or timeout and torn down before the next begins. Nothing is
//! retried.

use tracing::{info, warn};

use crate::supervisor::{self, Supervised};

use super::plan::{ScriptEntry, Suite};
use super::record::{ExecutionRecord, Outcome};
use super::report;
use super::summary::Summary;

/// Run every script in order, printing the console report as it goes
pub async fn run_suite(suite: &Suite) -> Vec<ExecutionRecord> {
    report::print_suite_start(suite);

    let mut records = Vec::with_capacity(suite.scripts.len());
    for script in &suite.scripts {
        let record = run_script(suite, script).await;
        if record.counts_toward_total() {
            report::print_record(&record, suite.echo);
        }
        records.push(record);
    }
    records
}

/// Run the suite and print the final report
pub async fn run_and_report(suite: &Suite) -> Summary {
    let records = run_suite(suite).await;
    let summary = Summary::from_records(&records);
    report::print_summary(&summary);

    info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed.len(),
        skipped = summary.skipped.len(),
        "Suite finished"
    );
    summary
}

/// Run a single script and turn whatever happens into a record
pub async fn run_script(suite: &Suite, script: &ScriptEntry) -> ExecutionRecord {
    if !script.path.exists() {
        warn!(
            script = script.name.as_str(),
            path = %script.path.display(),
            "Script not found, skipping"
        );
        report::print_missing(script);
        return ExecutionRecord::skipped(&script.name, script.path.clone());
    }

    report::print_script_start(script);
    info!(script = script.name.as_str(), "Running script");

    let mut record = ExecutionRecord {
        script: script.name.clone(),
        path: script.path.clone(),
        stdout: String::new(),
        stderr: String::new(),
        outcome: Outcome::Passed,
        elapsed: Default::default(),
    };

    let result = match suite.process_spec(script) {
        Ok(spec) => supervisor::run_bounded(&spec, suite.limits).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(Supervised::Exited(done)) => {
            record.outcome = if done.success {
                Outcome::Passed
            } else {
                warn!(
                    script = script.name.as_str(),
                    exit_code = done.exit_code,
                    "Script failed"
                );
                Outcome::Failed {
                    exit_code: done.exit_code,
                }
            };
            record.stdout = done.stdout;
            record.stderr = done.stderr;
            record.elapsed = done.elapsed;
        }
        Ok(Supervised::TimedOut { elapsed }) => {
            record.outcome = Outcome::TimedOut {
                limit: suite.limits.timeout,
            };
            record.elapsed = elapsed;
        }
        Err(e) => {
            warn!(script = script.name.as_str(), error = %e, "Script could not be run");
            record.outcome = Outcome::LaunchFailed {
                reason: e.to_string(),
            };
        }
    }

    record
}
