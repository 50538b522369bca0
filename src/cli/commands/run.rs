//! Run command implementation.
//!
//! The `pyprep run` command activates the environment, installs packages
//! and runs the verification script.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::FailurePolicy;
use crate::error::{PyprepError, Result};
use crate::runner::SequenceRunner;
use crate::steps::{Plan, StepContext};
use crate::ui::UserInterface;

use super::dispatcher::{prepare_config, Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
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
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    fn policy(&self, configured: FailurePolicy) -> FailurePolicy {
        if self.args.fail_fast {
            FailurePolicy::Halt
        } else {
            configured
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match prepare_config(&self.project_root, self.config_override.as_deref(), ui)
        {
            Ok(c) => c,
            Err(PyprepError::ConfigNotFound { path }) => {
                ui.error(&format!("Config file not found: {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let plan = Plan::from_config(&config);
        let policy = self.policy(config.settings.on_failure);
        tracing::debug!("Running {} steps with policy {:?}", plan.len(), policy);

        let mut ctx = StepContext::from_process(&self.project_root);
        ctx.dry_run = self.args.dry_run;

        let outcome = SequenceRunner::new(&plan, policy).run(&mut ctx, ui)?;

        if outcome.halted {
            if let Some(last) = outcome.steps.last() {
                ui.error(&format!(
                    "Stopped after {} failed (exit {})",
                    last.name, last.exit_code
                ));
            }
        }

        if ui.output_mode().shows_commands() {
            for step in &outcome.steps {
                ui.message(&format!(
                    "  {} {} ({:.1}s)",
                    step.name,
                    step.status(),
                    step.duration.as_secs_f64()
                ));
            }
        }

        tracing::debug!(
            "Run finished in {:?} with exit code {}",
            outcome.duration,
            outcome.exit_code()
        );

        Ok(CommandResult::from_exit_code(outcome.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, config: &str) {
        let dir = temp.path().join(".pyprep");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
    }

    #[test]
    fn run_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = RunCommand::new(temp.path(), RunArgs::default());

        assert_eq!(cmd.project_root(), temp.path());
        assert!(!cmd.args().dry_run);
    }

    #[test]
    fn fail_fast_overrides_config_policy() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            fail_fast: true,
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), args);

        assert_eq!(cmd.policy(FailurePolicy::Continue), FailurePolicy::Halt);
    }

    #[test]
    fn config_policy_used_without_flag() {
        let temp = TempDir::new().unwrap();
        let cmd = RunCommand::new(temp.path(), RunArgs::default());

        assert_eq!(cmd.policy(FailurePolicy::Halt), FailurePolicy::Halt);
        assert_eq!(cmd.policy(FailurePolicy::Continue), FailurePolicy::Continue);
    }

    #[test]
    fn missing_override_file_exits_2() {
        let temp = TempDir::new().unwrap();
        let override_path = temp.path().join("nope.yml");
        let cmd = RunCommand::new(temp.path(), RunArgs::default())
            .with_config_override(Some(&override_path));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("Config file not found"));
    }

    #[test]
    fn dry_run_previews_every_step() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            dry_run: true,
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Installing dependencies..."));
        assert!(ui.has_message("Verifying installation..."));
        assert_eq!(
            ui.commands(),
            vec![
                ". venv/bin/activate",
                "pip install streamlit pandas openpyxl",
                "./check_dependencies.py",
            ]
        );
    }

    #[test]
    fn missing_environment_and_script_continue_to_the_end() {
        let temp = TempDir::new().unwrap();
        write_config(&temp, "installer:\n  program: pyprep-no-such-installer\n");
        let cmd = RunCommand::new(temp.path(), RunArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 127);
        assert!(ui.has_warning("No such file or directory"));
        assert!(ui.has_message("Verifying installation..."));
        assert!(ui.has_error("./check_dependencies.py: command not found"));
    }

    #[test]
    fn fail_fast_stops_after_activation() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            fail_fast: true,
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Stopped after activate failed"));
        assert!(!ui.has_message("Verifying installation..."));
    }

    #[test]
    fn verbose_lists_step_statuses() {
        let temp = TempDir::new().unwrap();
        let args = RunArgs {
            dry_run: true,
            ..Default::default()
        };
        let cmd = RunCommand::new(temp.path(), args);
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("install dry-run"));
    }
}
