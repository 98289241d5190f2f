//! End-to-end tests for the suite-runner binary
//!
//! These tests verify the complete run by:
//! 1. Writing a suite configuration that points at shell fixtures
//! 2. Running the binary against it
//! 3. Checking the console report and the exit code

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

/// Test context with a scratch directory and cleanup
struct TestContext {
    /// Temporary directory for this test
    temp_dir: tempfile::TempDir,
    /// Path to the fixtures directory
    fixtures_dir: PathBuf,
}

/// Output of a finished runner process
struct RunnerOutput {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

impl From<Output> for RunnerOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        }
    }
}

impl TestContext {
    fn new() -> Self {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
            fixtures_dir: PathBuf::from(manifest_dir).join("tests").join("fixtures"),
        }
    }

    fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a config running `scripts` from the fixtures dir through `sh`
    fn write_config(&self, scripts: &[&str], extra: &str) -> PathBuf {
        let list = scripts
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(", ");
        let content = format!(
            "[suite]\nscript_dir = \"{}\"\ninterpreter = \"sh\"\nscripts = [{}]\n\n{}",
            self.fixtures_dir.display(),
            list,
            extra
        );
        let path = self.dir().join("suite-runner.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_suite-runner"));
        cmd.current_dir(self.dir())
            .env("NO_COLOR", "1")
            .env("XDG_CONFIG_HOME", self.dir().join("xdg"))
            .env("RUST_LOG", "suite_runner=warn");
        cmd
    }

    fn run(&self, args: &[&str]) -> RunnerOutput {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute suite-runner")
            .into()
    }
}

#[test]
fn test_pass_fail_and_missing_script() {
    let ctx = TestContext::new();
    let config = ctx.write_config(&["pass.sh", "fail.sh", "missing.sh"], "");

    let out = ctx.run(&["run", "--no-color", "--config", config.to_str().unwrap()]);

    assert_eq!(out.code, Some(1), "stdout:\n{}", out.stdout);
    assert!(out.stdout.contains("dashboard visible"));
    assert!(out.stdout.contains("STDERR: element 'Nova Venda' not found"));
    assert!(out.stdout.contains("pass.sh - PASSED"));
    assert!(out.stdout.contains("fail.sh - FAILED (exit code 1)"));
    assert!(out.stdout.contains("script 'missing.sh' not found"));
    assert!(out.stdout.contains("Scripts run:    2"));
    assert!(out.stdout.contains("Passed:         1"));
    assert!(out.stdout.contains("Failed:         1"));
    assert!(out.stdout.contains("Pass rate:      50.0%"));
    assert!(out.stdout.contains("Failed scripts:\n  - fail.sh"));
    assert!(out.stdout.contains("Skipped (not found):\n  - missing.sh"));
    assert!(out.stdout.contains("1 script(s) failed"));

    // Missing scripts are logged as warnings
    assert!(out.stderr.contains("Script not found"));
}

#[test]
fn test_timeout_marks_failure_and_moves_on() {
    let ctx = TestContext::new();
    let config = ctx.write_config(
        &["slow.sh", "pass.sh"],
        "[timeouts]\nscript_secs = 1\nterminate_grace_secs = 1\n",
    );

    let started = Instant::now();
    let out = ctx.run(&["run", "--config", config.to_str().unwrap()]);

    assert!(started.elapsed() < Duration::from_secs(20));
    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("slow.sh - TIMED OUT after 1s"));
    assert!(out.stdout.contains("pass.sh - PASSED"));
    assert!(out.stdout.contains("  - slow.sh (timed out)"));
    assert!(!out.stdout.contains("waiting for network idle"));
    assert!(out.stderr.contains("Script timed out"));
}

#[test]
fn test_timeout_flag_overrides_config() {
    let ctx = TestContext::new();
    let config = ctx.write_config(&["slow.sh"], "");

    let started = Instant::now();
    let out = ctx.run(&[
        "run",
        "--config",
        config.to_str().unwrap(),
        "--timeout",
        "1",
    ]);

    assert!(started.elapsed() < Duration::from_secs(20));
    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("TIMED OUT after 1s"));
}

#[test]
fn test_all_passed_exit_zero() {
    let ctx = TestContext::new();
    let config = ctx.write_config(
        &["pass.sh", "env.sh"],
        "[env]\nBASE_URL = \"http://localhost:3145\"\n",
    );

    let out = ctx.run(&["run", "--config", config.to_str().unwrap()]);

    assert_eq!(out.code, Some(0), "stdout:\n{}", out.stdout);
    assert!(out.stdout.contains("base url: http://localhost:3145"));
    assert!(out.stdout.contains("Pass rate:      100.0%"));
    assert!(out.stdout.contains("All scripts passed!"));
}

#[test]
fn test_empty_suite_reports_na() {
    let ctx = TestContext::new();
    let config = ctx.write_config(&[], "");

    let out = ctx.run(&["run", "--config", config.to_str().unwrap()]);

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Scripts run:    0"));
    assert!(out.stdout.contains("Pass rate:      N/A"));
}

#[test]
fn test_only_missing_scripts_exit_zero() {
    let ctx = TestContext::new();
    let config = ctx.write_config(&["gone.sh"], "");

    let out = ctx.run(&["run", "--config", config.to_str().unwrap()]);

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Pass rate:      N/A"));
    assert!(out.stdout.contains("  - gone.sh"));
}

#[test]
fn test_default_invocation_uses_local_config() {
    let ctx = TestContext::new();
    ctx.write_config(&["pass.sh"], "");

    let out = ctx.run(&[]);

    assert_eq!(out.code, Some(0), "stderr:\n{}", out.stderr);
    assert!(out.stdout.contains("pass.sh - PASSED"));
}

#[test]
fn test_positional_scripts_replace_list() {
    let ctx = TestContext::new();
    let config = ctx.write_config(&["fail.sh"], "");

    let out = ctx.run(&["run", "--config", config.to_str().unwrap(), "pass.sh"]);

    assert_eq!(out.code, Some(0));
    assert!(!out.stdout.contains("fail.sh"));
}

#[test]
fn test_quiet_hides_script_output() {
    let ctx = TestContext::new();
    let config = ctx.write_config(&["pass.sh", "fail.sh"], "");

    let out = ctx.run(&["run", "--quiet", "--config", config.to_str().unwrap()]);

    assert_eq!(out.code, Some(1));
    assert!(!out.stdout.contains("dashboard visible"));
    assert!(!out.stdout.contains("STDERR:"));
    assert!(out.stdout.contains("fail.sh - FAILED"));
}

#[test]
fn test_list_shows_presence() {
    let ctx = TestContext::new();
    let config = ctx.write_config(&["pass.sh", "missing.sh"], "");

    let out = ctx.run(&["list", "--config", config.to_str().unwrap()]);

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("✓ pass.sh"));
    assert!(out.stdout.contains("✗ missing.sh (missing)"));
    assert!(out.stdout.contains("Timeout: 120s"));
}

#[test]
fn test_invalid_config_is_error() {
    let ctx = TestContext::new();
    let path = ctx.dir().join("broken.toml");
    fs::write(&path, "[timeouts]\nscript_secs = 0\n").unwrap();

    let out = ctx.run(&["run", "--config", path.to_str().unwrap()]);

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Error: Configuration error"));
    assert!(!out.stdout.contains("FINAL REPORT"));
}

#[test]
fn test_unknown_interpreter_fails_each_script() {
    let ctx = TestContext::new();
    let path = ctx.dir().join("suite.yaml");
    fs::write(
        &path,
        format!(
            "suite:\n  script_dir: \"{}\"\n  interpreter: no-such-interpreter-xyz\n  scripts: [pass.sh, missing.sh, fail.sh]\n",
            ctx.fixtures_dir.display()
        ),
    )
    .unwrap();

    let out = ctx.run(&["run", "--config", path.to_str().unwrap()]);

    assert_eq!(out.code, Some(1), "stdout:\n{}", out.stdout);
    assert!(out
        .stdout
        .contains("pass.sh - ERROR: Interpreter 'no-such-interpreter-xyz' not found"));
    assert!(out
        .stdout
        .contains("fail.sh - ERROR: Interpreter 'no-such-interpreter-xyz' not found"));
    assert!(out.stdout.contains("FINAL REPORT"));
    assert!(out.stdout.contains("Scripts run:    2"));
    assert!(out.stdout.contains("Passed:         0"));
    assert!(out.stdout.contains("Failed scripts:\n  - pass.sh\n  - fail.sh"));
    assert!(out.stdout.contains("Skipped (not found):\n  - missing.sh"));
    assert!(!out.stderr.contains("Error:"));
}
