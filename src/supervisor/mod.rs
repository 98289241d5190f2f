//! Child process supervision
//!
//! Spawns a program with captured output, waits for it with a hard ceiling
//! and tears it down when the ceiling is reached. On Unix each child gets
//! its own process group so browsers started by a script die with it.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::common::{Error, Result};

/// How long captured pipes may keep draining after the child has exited
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Read size for captured pipes
const CHUNK_SIZE: usize = 8 * 1024;

/// A program invocation to supervise
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    /// Name used in logs and errors
    pub label: String,
    /// Executable to launch
    pub program: PathBuf,
    /// Arguments passed to the program
    pub args: Vec<OsString>,
    /// Extra environment variables, added to the inherited environment
    pub env: Vec<(String, String)>,
}

impl ProcessSpec {
    pub fn new(label: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Time limits for a supervised run
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Ceiling on the child's run time
    pub timeout: Duration,
    /// Time between SIGTERM and SIGKILL
    pub grace: Duration,
}

/// A child that exited on its own
#[derive(Debug, Clone)]
pub struct Completed {
    /// Exit code, `None` if the child was killed by a signal
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

/// Outcome of a supervised run
#[derive(Debug, Clone)]
pub enum Supervised {
    Exited(Completed),
    /// The ceiling was hit and the child was terminated; output is discarded
    TimedOut { elapsed: Duration },
}

/// Run a program to completion or until `limits.timeout` expires
pub async fn run_bounded(spec: &ProcessSpec, limits: Limits) -> Result<Supervised> {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(unix)]
    command.process_group(0);

    let start = Instant::now();
    let mut child = command
        .spawn()
        .map_err(|e| Error::script_spawn(&spec.label, e))?;

    // Captured now: `Child::id` is gone once the child has been reaped
    let pid = child.id();
    debug!(script = spec.label.as_str(), pid, "Spawned child process");

    let stdout = Capture::start(child.stdout.take());
    let stderr = Capture::start(child.stderr.take());

    match tokio::time::timeout(limits.timeout, child.wait()).await {
        Ok(Ok(status)) => {
            let elapsed = start.elapsed();
            // Grandchildren may still hold the pipes open. The leader is
            // already reaped here, so if the group emptied in the meantime
            // its id could in principle be taken by a new group leader; the
            // window is a few microseconds and the kill is worth it to stop
            // orphaned browsers.
            #[cfg(unix)]
            if let Some(pid) = pid {
                signal_group(pid, libc::SIGKILL);
            }
            let stdout = stdout.collect().await;
            let stderr = stderr.collect().await;

            debug!(
                script = spec.label.as_str(),
                exit_code = status.code(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Child exited"
            );

            Ok(Supervised::Exited(Completed {
                exit_code: status.code(),
                success: status.success(),
                stdout,
                stderr,
                elapsed,
            }))
        }
        Ok(Err(e)) => {
            stdout.abort();
            stderr.abort();
            terminate(&mut child, pid, limits.grace).await;
            Err(Error::Io(e))
        }
        Err(_) => {
            warn!(
                script = spec.label.as_str(),
                timeout_secs = limits.timeout.as_secs(),
                "Script timed out, terminating"
            );
            terminate(&mut child, pid, limits.grace).await;
            stdout.abort();
            stderr.abort();
            Ok(Supervised::TimedOut {
                elapsed: start.elapsed(),
            })
        }
    }
}

/// A pipe being read on a background task
///
/// Bytes land in a shared buffer chunk by chunk, so whatever was read
/// survives if the task has to be abandoned.
struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl Capture {
    fn start<R>(reader: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let task = tokio::spawn(drain(reader, Arc::clone(&buf)));
        Self { buf, task }
    }

    fn abort(self) {
        self.task.abort();
    }

    /// Wait for end of stream, giving up after `DRAIN_TIMEOUT`
    ///
    /// Returns everything read so far as lossy UTF-8 either way.
    async fn collect(mut self) -> String {
        match tokio::time::timeout(DRAIN_TIMEOUT, &mut self.task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Output reader task failed"),
            Err(_) => {
                self.task.abort();
                warn!("Child output did not close after exit, keeping what was read");
            }
        }
        let buf = self.buf.lock().map(|b| b.clone()).unwrap_or_else(|e| e.into_inner().clone());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Copy a pipe into `buf` until end of stream
async fn drain<R: AsyncRead + Unpin>(reader: Option<R>, buf: Arc<Mutex<Vec<u8>>>) {
    let Some(mut reader) = reader else {
        return;
    };
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => match buf.lock() {
                Ok(mut buf) => buf.extend_from_slice(&chunk[..n]),
                Err(e) => e.into_inner().extend_from_slice(&chunk[..n]),
            },
            Err(e) => {
                debug!(error = %e, "Error reading child output");
                break;
            }
        }
    }
}

/// Terminate a child and, on Unix, its whole process group
///
/// Sends SIGTERM first, waits up to `grace`, then sends SIGKILL.
async fn terminate(child: &mut Child, pid: Option<u32>, grace: Duration) {
    #[cfg(unix)]
    if let Some(pid) = pid {
        signal_group(pid, libc::SIGTERM);
    }

    match tokio::time::timeout(grace, child.wait()).await {
        Ok(Ok(status)) => {
            debug!(exit_code = status.code(), "Child exited after SIGTERM");
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Error waiting for child after SIGTERM");
        }
        Err(_) => {
            warn!("Child did not exit after SIGTERM, sending SIGKILL");
            if let Err(e) = child.kill().await {
                warn!(error = %e, "Failed to SIGKILL child");
            }
        }
    }

    // Stragglers in the group outlive the leader
    #[cfg(unix)]
    if let Some(pid) = pid {
        signal_group(pid, libc::SIGKILL);
    }
    #[cfg(not(unix))]
    let _ = pid;
}

/// Signal every process in the group led by `pid`
///
/// Children are spawned with `process_group(0)`, so the group id is the
/// leader's pid. ESRCH just means the group is already gone.
#[cfg(unix)]
fn signal_group(pid: u32, signal: libc::c_int) {
    unsafe {
        libc::kill(-(pid as libc::pid_t), signal);
    }
}
