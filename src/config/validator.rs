//! Configuration validation rules.
//!
//! - The environment path, installer program and verify script must be set
//! - The installer needs packages or a requirements file
//! - Check modules must be unique

use crate::config::schema::PyprepConfig;
use crate::error::{PyprepError, Result};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every error rather than stopping at the first one.
pub fn validate_config(config: &PyprepConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.environment.path.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "empty-environment-path",
            "environment.path must not be empty",
        ));
    }

    if config.installer.program.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-installer-program",
            "installer.program must not be empty",
        ));
    }

    if config.installer.packages.is_empty() && config.installer.requirements_file.is_none() {
        errors.push(ValidationError::new(
            "nothing-to-install",
            "installer.packages is empty and no installer.requirements_file is set",
        ));
    }

    if config.verify.script.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "empty-verify-script",
            "verify.script must not be empty",
        ));
    }

    let mut seen = HashSet::new();
    for package in &config.check.packages {
        if !seen.insert(package.module.as_str()) {
            errors.push(ValidationError::new(
                "duplicate-check-module",
                format!("check.packages lists '{}' more than once", package.module),
            ));
        }
    }

    errors
}

/// Validate a configuration, failing with all messages joined.
pub fn validate(config: &PyprepConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PyprepError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RequiredPackage;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&PyprepConfig::default()).is_ok());
    }

    #[test]
    fn empty_program_is_rejected() {
        let mut config = PyprepConfig::default();
        config.installer.program = "  ".to_string();

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "empty-installer-program");
    }

    #[test]
    fn requirements_file_allows_empty_packages() {
        let mut config = PyprepConfig::default();
        config.installer.packages.clear();
        assert_eq!(validate_config(&config)[0].rule, "nothing-to-install");

        config.installer.requirements_file = Some(PathBuf::from("requirements.txt"));
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn duplicate_check_modules_are_rejected() {
        let mut config = PyprepConfig::default();
        config
            .check
            .packages
            .push(RequiredPackage::new("pandas", "Pandas again"));

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("pandas"));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = PyprepConfig::default();
        config.environment.path = PathBuf::new();
        config.verify.script = PathBuf::new();

        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("environment.path"));
        assert!(msg.contains("verify.script"));
    }
}
