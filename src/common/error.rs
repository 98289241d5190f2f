//! Error types for the suite runner
//!
//! Only configuration problems abort a run. Anything that goes wrong while
//! launching or waiting on a single script is folded into that script's
//! execution record instead.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the suite runner
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Interpreter '{name}' not found in PATH: {error}")]
    InterpreterNotFound { name: String, error: String },

    // === Process Errors ===
    #[error("Failed to launch '{script}': {source}")]
    ScriptSpawn {
        script: String,
        #[source]
        source: io::Error,
    },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a spawn error for the given script
    pub fn script_spawn(script: &str, source: io::Error) -> Self {
        Self::ScriptSpawn {
            script: script.to_string(),
            source,
        }
    }

    /// Create an interpreter lookup error
    pub fn interpreter_not_found(name: &str, error: impl ToString) -> Self {
        Self::InterpreterNotFound {
            name: name.to_string(),
            error: error.to_string(),
        }
    }
}
