//! Console report
//!
//! Everything here writes to stdout; logs go to stderr through tracing.

use colored::Colorize;

use super::plan::{Launcher, ScriptEntry, Suite};
use super::record::{ExecutionRecord, Outcome};
use super::summary::{format_pass_rate, Summary};

const RULE_WIDTH: usize = 60;
const SUMMARY_RULE_WIDTH: usize = 80;

pub fn print_suite_start(suite: &Suite) {
    println!(
        "{} {} script(s), timeout {}s each",
        "Running suite:".blue().bold(),
        suite.scripts.len(),
        suite.limits.timeout.as_secs()
    );
}

pub fn print_script_start(script: &ScriptEntry) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule.dimmed());
    println!("{} {}", "Running:".cyan(), script.name.white().bold());
    println!("{}", rule.dimmed());
}

pub fn print_missing(script: &ScriptEntry) {
    println!(
        "{} script '{}' not found at {}",
        "⚠ WARNING:".yellow().bold(),
        script.name,
        script.path.display()
    );
}

/// Print captured output (when `echo` is set) followed by the result line
pub fn print_record(record: &ExecutionRecord, echo: bool) {
    if echo {
        if !record.stdout.is_empty() {
            print!("{}", record.stdout);
            if !record.stdout.ends_with('\n') {
                println!();
            }
        }
        if !record.stderr.is_empty() {
            println!("{} {}", "STDERR:".red(), record.stderr.trim_end());
        }
    }

    let elapsed = format!("({:.1}s)", record.elapsed.as_secs_f64());
    match &record.outcome {
        Outcome::Passed => println!(
            "{} {} - {} {}",
            "✓".green(),
            record.script,
            "PASSED".green().bold(),
            elapsed.dimmed()
        ),
        Outcome::Failed { exit_code } => {
            let code = exit_code
                .map(|c| format!("exit code {}", c))
                .unwrap_or_else(|| "killed by signal".to_string());
            println!(
                "{} {} - {} ({}) {}",
                "✗".red(),
                record.script,
                "FAILED".red().bold(),
                code,
                elapsed.dimmed()
            );
        }
        Outcome::TimedOut { limit } => println!(
            "{} {} - {} after {}s",
            "✗".red(),
            record.script,
            "TIMED OUT".red().bold(),
            limit.as_secs()
        ),
        Outcome::LaunchFailed { reason } => println!(
            "{} {} - {}: {}",
            "✗".red(),
            record.script,
            "ERROR".red().bold(),
            reason
        ),
        Outcome::Skipped => {}
    }
}

pub fn print_summary(summary: &Summary) {
    let rule = "=".repeat(SUMMARY_RULE_WIDTH);
    println!("\n{}", rule);
    println!("{}", "FINAL REPORT".bold());
    println!("{}", rule);
    println!("Scripts run:    {}", summary.total);
    println!("Passed:         {}", summary.passed);
    println!("Failed:         {}", summary.failed.len());
    println!("Pass rate:      {}", format_pass_rate(summary.pass_rate()));

    if !summary.failed.is_empty() {
        println!("\n{}", "Failed scripts:".red().bold());
        for script in &summary.failed {
            if summary.timed_out.contains(script) {
                println!("  - {} (timed out)", script);
            } else {
                println!("  - {}", script);
            }
        }
    }

    if !summary.skipped.is_empty() {
        println!("\n{}", "Skipped (not found):".yellow().bold());
        for script in &summary.skipped {
            println!("  - {}", script);
        }
    }

    if summary.all_passed() {
        println!("\n{}", "All scripts passed!".green().bold());
    } else {
        println!(
            "\n{}",
            format!("{} script(s) failed", summary.failed.len())
                .red()
                .bold()
        );
    }
}

/// Print the `list` view of a suite
pub fn print_plan(suite: &Suite) {
    let interpreter = match &suite.launcher {
        Launcher::Direct => "(scripts run directly)".to_string(),
        Launcher::Interpreter(path) => path.display().to_string(),
        Launcher::Unresolved { name, .. } => format!("{} {}", name, "(not found in PATH)".red()),
    };

    println!("{} {}", "Script dir:".cyan(), suite.script_dir.display());
    println!("{} {}", "Interpreter:".cyan(), interpreter);
    println!(
        "{} {}s",
        "Timeout:".cyan(),
        suite.limits.timeout.as_secs()
    );
    println!();

    for script in &suite.scripts {
        if script.path.exists() {
            println!("  {} {}", "✓".green(), script.name);
        } else {
            println!("  {} {} {}", "✗".red(), script.name, "(missing)".dimmed());
        }
    }
}
