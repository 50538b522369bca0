//! Configuration schema definitions for pyprep.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format. Every field has a default, so an absent
//! config file yields the stock behavior: activate `venv`, install
//! `streamlit pandas openpyxl` with `pip`, then run `check_dependencies.py`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.pyprep/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PyprepConfig {
    /// Global settings
    pub settings: Settings,

    /// Virtual environment location and activation mode
    pub environment: EnvironmentConfig,

    /// Package installer invocation
    pub installer: InstallerConfig,

    /// Verification script invocation
    pub verify: VerifyConfig,

    /// Status messages printed between steps
    pub messages: Messages,

    /// Built-in dependency check
    pub check: CheckConfig,
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// What to do when a step fails
    pub on_failure: FailurePolicy,

    /// Default output mode: verbose, normal, quiet, silent
    pub default_output: OutputMode,
}

/// Policy applied when a step exits non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep going; the last step's status becomes the exit status.
    #[default]
    Continue,
    /// Stop at the first failing step.
    Halt,
}

/// Output verbosity as written in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

/// Where the virtual environment lives and how it is activated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Environment root, relative to the project directory
    pub path: PathBuf,

    /// Activation mode
    pub activation: ActivationMode,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("venv"),
            activation: ActivationMode::Native,
        }
    }
}

/// How the activation environment is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    /// Compute the activated variables directly.
    #[default]
    Native,
    /// Source the environment's `activate` script in `/bin/sh` and capture the result.
    Source,
}

/// Package installer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InstallerConfig {
    /// Installer program, resolved through the activated PATH
    pub program: String,

    /// Arguments placed before the package list
    pub args: Vec<String>,

    /// Packages to install, in order
    pub packages: Vec<String>,

    /// Optional requirements file passed as `-r <file>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements_file: Option<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: "pip".to_string(),
            args: vec!["install".to_string()],
            packages: default_packages(),
            requirements_file: None,
        }
    }
}

fn default_packages() -> Vec<String> {
    ["streamlit", "pandas", "openpyxl"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl InstallerConfig {
    /// Full argument list: `args`, then packages, then `-r <file>` if set.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = self.args.clone();
        argv.extend(self.packages.iter().cloned());
        if let Some(file) = &self.requirements_file {
            argv.push("-r".to_string());
            argv.push(file.display().to_string());
        }
        argv
    }
}

/// Verification script invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VerifyConfig {
    /// Script path, relative to the project directory
    pub script: PathBuf,

    /// Interpreter to run the script with (executed directly when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("check_dependencies.py"),
            interpreter: None,
        }
    }
}

/// Status messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Messages {
    /// Printed before activation and install
    pub installing: String,

    /// Printed before verification
    pub verifying: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            installing: "Installing dependencies...".to_string(),
            verifying: "Verifying installation...".to_string(),
        }
    }
}

/// Built-in dependency check configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CheckConfig {
    /// Required packages, checked in order
    pub packages: Vec<RequiredPackage>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            packages: vec![
                RequiredPackage::new("streamlit", "Streamlit"),
                RequiredPackage::new("pandas", "Pandas"),
                RequiredPackage::new("requests", "Requests"),
                RequiredPackage::new("openpyxl", "OpenPyXL"),
                RequiredPackage::new("plotly", "Plotly"),
            ],
        }
    }
}

/// A module that must be importable, with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RequiredPackage {
    /// Import name (`import <module>`)
    pub module: String,

    /// Human-readable name
    pub name: String,
}

impl RequiredPackage {
    /// Create a required package entry.
    pub fn new(module: &str, name: &str) -> Self {
        Self {
            module: module.to_string(),
            name: name.to_string(),
        }
    }
}
