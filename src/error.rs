//! Error types for pyprep operations.
//!
//! This module defines [`PyprepError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Failures of the external tools (installer, verifier) are *not* errors:
//!   they surface as exit statuses on step results
//! - Use `PyprepError` for pyprep's own failures (config, spawning, IO)
//! - Use `anyhow::Error` (via `PyprepError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pyprep operations.
#[derive(Debug, Error)]
pub enum PyprepError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The virtual environment directory does not exist.
    #[error("Virtual environment not found: {path}")]
    EnvironmentNotFound { path: PathBuf },

    /// Sourcing the activation script did not produce an environment.
    #[error("Failed to activate {path}: {message}")]
    ActivationFailed { path: PathBuf, message: String },

    /// A command could not be spawned or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pyprep operations.
pub type Result<T> = std::result::Result<T, PyprepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PyprepError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = PyprepError::ConfigValidationError {
            message: "installer.program must not be empty".into(),
        };
        assert!(err.to_string().contains("installer.program"));
    }

    #[test]
    fn environment_not_found_displays_path() {
        let err = PyprepError::EnvironmentNotFound {
            path: PathBuf::from("venv"),
        };
        assert_eq!(err.to_string(), "Virtual environment not found: venv");
    }

    #[test]
    fn activation_failed_displays_path_and_message() {
        let err = PyprepError::ActivationFailed {
            path: PathBuf::from("venv/bin/activate"),
            message: "exit code 2".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("venv/bin/activate"));
        assert!(msg.contains("exit code 2"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = PyprepError::CommandFailed {
            command: "pip install pandas".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("pip install pandas"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PyprepError = io_err.into();
        assert!(matches!(err, PyprepError::Io(_)));
    }
}
