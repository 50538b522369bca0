//! Config command implementation.
//!
//! The `pyprep config` command shows the resolved configuration, or the
//! JSON Schema of the config file.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{ConfigPaths, PyprepConfig};
use crate::error::{PyprepError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{prepare_config, Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: None,
            args,
        }
    }

    /// Load config from this file instead of discovering it.
    pub fn with_config_override(mut self, path: Option<&Path>) -> Self {
        self.config_override = path.map(Path::to_path_buf);
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }

    fn sources(&self) -> Vec<PathBuf> {
        match &self.config_override {
            Some(path) => vec![self.project_root.join(path)],
            None => ConfigPaths::discover(&self.project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            let schema = schemars::schema_for!(PyprepConfig);
            let json =
                serde_json::to_string_pretty(&schema).map_err(|e| PyprepError::Other(e.into()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        let config = match prepare_config(&self.project_root, self.config_override.as_deref(), ui)
        {
            Ok(c) => c,
            Err(PyprepError::ConfigNotFound { path }) => {
                ui.error(&format!("Config file not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&config).map_err(|e| PyprepError::Other(e.into()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        let sources = self.sources();
        if sources.is_empty() {
            ui.output("# built-in defaults");
        }
        for path in &sources {
            ui.output(&format!("# {}", path.display()));
        }
        ui.output("");

        let yaml = serde_yaml::to_string(&config).map_err(|e| PyprepError::Other(e.into()))?;
        ui.output(&yaml);

        Ok(CommandResult::success())
    }
}
