//! Configuration file discovery and loading.
//!
//! Config files are optional. When none exist, [`load_config`] returns
//! [`PyprepConfig::default`].

use crate::config::merger::merge_configs;
use crate::config::schema::PyprepConfig;
use crate::error::{PyprepError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".pyprep";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project config (`.pyprep/config.yml`)
/// 2. Local overrides (`.pyprep/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: .pyprep/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .pyprep/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project
            .iter()
            .chain(self.project_local.iter())
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Parse YAML content into PyprepConfig.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PyprepConfig> {
    let value = parse_value(content, source_path)?;
    serde_yaml::from_value(value).map_err(|e| PyprepError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value (for merging).
///
/// An empty file is treated as an empty mapping.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PyprepError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PyprepError::Io(e)
        }
    })?;

    parse_value(&content, path)
}

fn parse_value(content: &str, source_path: &Path) -> Result<serde_yaml::Value> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| PyprepError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if value.is_null() {
        Ok(serde_yaml::Value::Mapping(Default::default()))
    } else {
        Ok(value)
    }
}

/// Load and merge all discovered config files for a project.
///
/// Returns the default configuration when no file exists.
pub fn load_merged_config(project_root: &Path) -> Result<PyprepConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();

    if existing.is_empty() {
        tracing::debug!("No config under {}, using defaults", project_root.display());
        return Ok(PyprepConfig::default());
    }

    let mut configs = Vec::new();
    for path in existing {
        tracing::debug!("Loading config {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);

    serde_yaml::from_value(merged).map_err(|e| PyprepError::ConfigParseError {
        path: project_root.join(CONFIG_DIR).join("config.yml"),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging;
/// the file must exist. Otherwise, discovers and merges config files.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PyprepConfig> {
    match config_override {
        Some(path) => {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                project_root.join(path)
            };
            tracing::debug!("Loading config override {}", path.display());
            let value = load_config_value(&path)?;
            serde_yaml::from_value(value).map_err(|e| PyprepError::ConfigParseError {
                path,
                message: e.to_string(),
            })
        }
        None => load_merged_config(project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FailurePolicy;
    use tempfile::TempDir;

    fn write_config(root: &Path, name: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, PyprepConfig::default());
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "{}");
        write_config(temp.path(), "config.local.yml", "{}");

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn local_overrides_project() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "settings:\n  on_failure: halt\ninstaller:\n  packages: [numpy]\n",
        );
        write_config(
            temp.path(),
            "config.local.yml",
            "settings:\n  on_failure: continue\n",
        );

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.settings.on_failure, FailurePolicy::Continue);
        assert_eq!(config.installer.packages, vec!["numpy"]);
    }

    #[test]
    fn empty_config_file_is_accepted() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, PyprepConfig::default());
    }

    #[test]
    fn invalid_yaml_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "installer: [unclosed");

        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, PyprepError::ConfigParseError { .. }));
    }

    #[test]
    fn override_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(Path::new("missing.yml"))).unwrap_err();
        assert!(matches!(err, PyprepError::ConfigNotFound { .. }));
    }

    #[test]
    fn override_path_skips_discovery() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "environment:\n  path: ignored\n");
        fs::write(temp.path().join("alt.yml"), "environment:\n  path: .venv\n").unwrap();

        let config = load_config(temp.path(), Some(Path::new("alt.yml"))).unwrap();
        assert_eq!(config.environment.path, PathBuf::from(".venv"));
    }
}
