//! Configuration loading, parsing, and validation for pyprep.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use pyprep::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let config_dir = temp.path().join(".pyprep");
//! fs::create_dir_all(&config_dir).unwrap();
//! fs::write(config_dir.join("config.yml"), "environment:\n  path: .venv\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.environment.path, std::path::PathBuf::from(".venv"));
//! ```
//!
//! # Configuration File Locations
//!
//! Config is optional. When present it is merged in this order:
//! 1. Project config (`.pyprep/config.yml`)
//! 2. Local overrides (`.pyprep/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use schema::{
    ActivationMode, CheckConfig, EnvironmentConfig, FailurePolicy, InstallerConfig, Messages,
    OutputMode, PyprepConfig, RequiredPackage, Settings, VerifyConfig,
};

pub use loader::{
    load_config, load_config_value, load_merged_config, parse_config, ConfigPaths, CONFIG_DIR,
};

pub use merger::{deep_merge, merge_configs};

pub use validator::{validate, validate_config, ValidationError};
