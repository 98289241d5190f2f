//! Configuration file handling
//!
//! A suite is described by a TOML file (or YAML, picked by extension).
//! Every field has a default, so an absent file yields the built-in suite.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::paths::{self, config_path, local_config_path};
use super::{Error, Result};

/// Scenario scripts run when no configuration overrides the list
pub const DEFAULT_SCRIPTS: &[&str] = &[
    "TC001_User_Authentication_Success_with_Valid_Credentials.py",
    "TC002_User_Authentication_Failure_with_Invalid_Credentials.py",
    "TC003_Multi_Company_Data_Isolation.py",
    "TC004_Client_Registration_with_Valid_CPFCNPJ.py",
    "TC005_Client_Registration_with_Invalid_CPFCNPJ.py",
    "TC006_Product_Catalogue_Creation_and_Validation.py",
    "TC007_Sales_Simple_Test.py",
    "TC008_Sales_Simple_Test.py",
    "TC009_Budget_Creation_PDF_Generation_and_Email_Dispatch.py",
    "TC010_Budget_Creation_with_Invalid_Email_Configuration.py",
    "TC011_Financial_Transactions_Receipts_and_Payments_Recording.py",
    "TC012_Dashboard_Real_Time_Metrics_and_Graph_Updates.py",
    "TC013_Backup_Export_and_Import_with_Data_Integrity.py",
    "TC015_Security_Authorization_Middleware_Blocking_Unauthorized_Access.py",
    "TC016_Responsive_UI_Behavior_Across_Devices.py",
    "TC017_Performance_Response_Time_Under_Load_for_Basic_Operations.py",
    "TC018_Backup_Import_Handling_Malformed_JSON_Backup_Files.py",
    "TC019_User_Preferences_Persistence_and_Isolation.py",
    "TC020_First_Time_Installation_Auto_Setup_Flow.py",
];

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Which scripts to run and how to launch them
    #[serde(default)]
    pub suite: SuiteConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Console output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Extra environment variables passed to every script
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// File this configuration was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Script list and launch settings
#[derive(Debug, Deserialize)]
pub struct SuiteConfig {
    /// Directory containing the scripts, relative to the config file
    #[serde(default = "default_script_dir")]
    pub script_dir: PathBuf,

    /// Program used to run each script; an empty string executes scripts directly
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Arguments placed between the interpreter and the script path
    #[serde(default)]
    pub interpreter_args: Vec<String>,

    /// Ordered script list
    #[serde(default = "default_scripts")]
    pub scripts: Vec<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            script_dir: default_script_dir(),
            interpreter: default_interpreter(),
            interpreter_args: Vec::new(),
            scripts: default_scripts(),
        }
    }
}

fn default_script_dir() -> PathBuf {
    PathBuf::from("testsprite_tests")
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_scripts() -> Vec<String> {
    DEFAULT_SCRIPTS.iter().map(|s| s.to_string()).collect()
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timeouts {
    /// Ceiling on a single script's run time
    #[serde(default = "default_script_secs")]
    pub script_secs: u64,

    /// Time between SIGTERM and SIGKILL when a script is terminated
    #[serde(default = "default_grace_secs")]
    pub terminate_grace_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            script_secs: default_script_secs(),
            terminate_grace_secs: default_grace_secs(),
        }
    }
}

fn default_script_secs() -> u64 {
    120
}
fn default_grace_secs() -> u64 {
    5
}

/// Console output configuration
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Print each script's captured stdout/stderr
    #[serde(default = "default_echo")]
    pub echo: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            echo: default_echo(),
        }
    }
}

fn default_echo() -> bool {
    true
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Otherwise `./suite-runner.toml` is tried,
    /// then the user config file, then the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file '{}' does not exist",
                    path.display()
                )));
            }
            return Self::from_path(path);
        }

        let local = local_config_path(&std::env::current_dir()?);
        if local.exists() {
            return Self::from_path(&local);
        }

        if let Some(path) = config_path() {
            if path.exists() {
                return Self::from_path(&path);
            }
        }

        tracing::debug!("No configuration file found, using built-in suite");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let mut config = if is_yaml {
            Self::from_yaml(&content)?
        } else {
            Self::from_toml(&content)?
        };
        config.source = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the runner cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.timeouts.script_secs == 0 {
            return Err(Error::Config(
                "timeouts.script_secs must be greater than zero".to_string(),
            ));
        }
        if let Some(pos) = self.suite.scripts.iter().position(|s| s.trim().is_empty()) {
            return Err(Error::Config(format!(
                "suite.scripts[{}] is empty",
                pos
            )));
        }
        Ok(())
    }

    /// Interpreter to launch scripts with, `None` when they run directly
    pub fn interpreter(&self) -> Option<&str> {
        let name = self.suite.interpreter.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Directory relative paths in this configuration are resolved against
    pub fn base_dir(&self) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Absolute or base-relative directory holding the scripts
    pub fn script_dir(&self) -> PathBuf {
        paths::resolve_against(&self.base_dir(), &self.suite.script_dir)
    }
}
