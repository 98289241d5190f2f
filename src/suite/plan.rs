//! Resolved suite: the ordered script list plus how to launch each script

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::config::Config;
use crate::common::{paths, Error, Result};
use crate::supervisor::{Limits, ProcessSpec};
use tracing::warn;

/// One configured script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    /// Identifier as written in the configuration
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
}

/// How scripts are started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    /// Execute the script file itself
    Direct,
    /// Run `<interpreter> <args..> <script>`
    Interpreter(PathBuf),
    /// The configured interpreter was not found; every launch fails with this
    Unresolved { name: String, reason: String },
}

/// Everything the runner needs, with paths and the interpreter resolved
#[derive(Debug, Clone)]
pub struct Suite {
    pub script_dir: PathBuf,
    pub scripts: Vec<ScriptEntry>,
    pub launcher: Launcher,
    pub interpreter_args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub limits: Limits,
    /// Echo captured child output in the console report
    pub echo: bool,
}

impl Suite {
    /// Build a suite from configuration
    ///
    /// The interpreter is looked up in PATH once here. A failed lookup does
    /// not abort: each script that exists is then recorded as a launch
    /// failure by the runner.
    pub fn from_config(config: &Config) -> Self {
        let launcher = match config.interpreter() {
            None => Launcher::Direct,
            Some(name) => match which::which(name) {
                Ok(path) => Launcher::Interpreter(path),
                Err(e) => {
                    warn!(interpreter = name, error = %e, "Interpreter not found in PATH");
                    Launcher::Unresolved {
                        name: name.to_string(),
                        reason: e.to_string(),
                    }
                }
            },
        };

        let script_dir = config.script_dir();
        let scripts = config
            .suite
            .scripts
            .iter()
            .map(|name| entry(&script_dir, name))
            .collect();

        Self {
            script_dir,
            scripts,
            launcher,
            interpreter_args: config.suite.interpreter_args.clone(),
            env: config
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            limits: Limits {
                timeout: Duration::from_secs(config.timeouts.script_secs),
                grace: Duration::from_secs(config.timeouts.terminate_grace_secs),
            },
            echo: config.output.echo,
        }
    }

    /// Replace the configured script list
    pub fn with_scripts<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.scripts = names
            .iter()
            .map(|name| entry(&self.script_dir, name.as_ref()))
            .collect();
        self
    }

    /// Override the per-script timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        self.limits.timeout = timeout;
        Ok(self)
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Command line for a script: `<interpreter> <args..> <script>` or the script itself
    ///
    /// Fails when the interpreter could not be resolved.
    pub fn process_spec(&self, script: &ScriptEntry) -> Result<ProcessSpec> {
        let mut spec = match &self.launcher {
            Launcher::Interpreter(interpreter) => {
                let spec = self
                    .interpreter_args
                    .iter()
                    .fold(ProcessSpec::new(&script.name, interpreter), |spec, arg| {
                        spec.arg(arg)
                    });
                spec.arg(&script.path)
            }
            Launcher::Direct => ProcessSpec::new(&script.name, &script.path),
            Launcher::Unresolved { name, reason } => {
                return Err(Error::interpreter_not_found(name, reason));
            }
        };
        for (key, value) in &self.env {
            spec = spec.env(key, value);
        }
        Ok(spec)
    }
}

fn entry(script_dir: &Path, name: &str) -> ScriptEntry {
    ScriptEntry {
        name: name.to_string(),
        path: paths::resolve_against(script_dir, Path::new(name)),
    }
}
