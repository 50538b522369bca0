//! Check command implementation.
//!
//! The `pyprep check` command imports each required package with the
//! environment's interpreter and reports what is missing.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::check::{find_interpreter, CheckReport, DependencyChecker};
use crate::cli::args::CheckArgs;
use crate::config::{EnvironmentConfig, PyprepConfig};
use crate::environment::{ActivatedEnv, VirtualEnv};
use crate::error::{PyprepError, Result};
use crate::shell::{EnvVars, EXIT_NOT_FOUND};
use crate::ui::UserInterface;

use super::dispatcher::{prepare_config, Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: CheckArgs,
}

#[derive(Debug, Serialize)]
struct JsonPackage<'a> {
    module: &'a str,
    name: &'a str,
    installed: bool,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    interpreter: String,
    packages: Vec<JsonPackage<'a>>,
    missing: Vec<&'a str>,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
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

    /// Activate the configured environment, falling back to the ambient one.
    fn scoped_env(
        &self,
        environment: &EnvironmentConfig,
        base: EnvVars,
        ui: &mut dyn UserInterface,
    ) -> Result<ActivatedEnv> {
        let venv = match VirtualEnv::locate(&self.project_root, &environment.path) {
            Ok(venv) => venv,
            Err(PyprepError::EnvironmentNotFound { path }) => {
                ui.warning(&format!(
                    "{}: No such file or directory; checking the ambient environment",
                    path.display()
                ));
                return Ok(ActivatedEnv::ambient(base));
            }
            Err(e) => return Err(e),
        };

        match ActivatedEnv::activate(&venv, environment.activation, base.clone(), &self.project_root)
        {
            Ok(env) => Ok(env),
            Err(PyprepError::ActivationFailed { path, message }) => {
                ui.warning(&format!("{}: {}", path.display(), message));
                Ok(ActivatedEnv::ambient(base))
            }
            Err(e) => Err(e),
        }
    }

    fn run_checks(
        &self,
        config: &PyprepConfig,
        checker: &DependencyChecker<'_>,
        ui: &mut dyn UserInterface,
    ) -> Result<CheckReport> {
        let mut report = CheckReport::new();
        let show_progress = !self.args.json && ui.output_mode().shows_status();

        if show_progress && ui.output_mode().shows_headers() {
            ui.show_header("Checking required packages");
        }

        for package in &config.check.packages {
            if !show_progress {
                report.push(checker.check(package)?);
                continue;
            }

            let mut spinner = ui.start_spinner(&format!("Checking {}", package.name));
            let check = checker.check(package)?;
            if check.is_installed() {
                spinner.finish_success(&format!("{} installed", package.name));
            } else {
                spinner.finish_error(&format!("{} not installed", package.name));
            }
            report.push(check);
        }

        Ok(report)
    }

    fn print_json(
        &self,
        interpreter: &Path,
        report: &CheckReport,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let json = JsonReport {
            interpreter: interpreter.display().to_string(),
            packages: report
                .checks()
                .iter()
                .map(|c| JsonPackage {
                    module: &c.package.module,
                    name: &c.package.name,
                    installed: c.is_installed(),
                })
                .collect(),
            missing: report.missing_modules(),
        };
        let text = serde_json::to_string_pretty(&json).map_err(|e| PyprepError::Other(e.into()))?;
        ui.output(&text);
        Ok(())
    }
}

impl Command for CheckCommand {
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

        let base = std::env::vars_os().collect();
        let env = self.scoped_env(&config.environment, base, ui)?;

        let Some(interpreter) = find_interpreter(&env, &self.project_root) else {
            ui.error("python: command not found");
            return Ok(CommandResult::failure(EXIT_NOT_FOUND));
        };
        tracing::debug!("Checking imports with {}", interpreter.display());

        let checker = DependencyChecker::new(interpreter, &env, &self.project_root);
        let report = self.run_checks(&config, &checker, ui)?;

        if self.args.json {
            self.print_json(checker.interpreter(), &report, ui)?;
        } else {
            report.render_summary(ui);
        }

        Ok(CommandResult::from_exit_code(report.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn check_command_creation() {
        let cmd = CheckCommand::new(Path::new("/srv/app"), CheckArgs::default());
        assert_eq!(cmd.project_root(), Path::new("/srv/app"));
    }

    #[test]
    fn missing_environment_falls_back_to_ambient() {
        let temp = tempfile::TempDir::new().unwrap();
        let cmd = CheckCommand::new(temp.path(), CheckArgs::default());
        let mut ui = MockUI::new();
        let mut base = EnvVars::new();
        base.insert("PATH".into(), "/usr/bin".into());

        let env = cmd
            .scoped_env(&EnvironmentConfig::default(), base, &mut ui)
            .unwrap();

        assert!(!env.is_isolated());
        assert_eq!(env.get("PATH"), Some("/usr/bin"));
        assert!(ui.has_warning("checking the ambient environment"));
    }

    #[cfg(unix)]
    mod with_fake_venv {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        /// A project whose venv python fails to import the modules in `missing`.
        fn project(missing: &[&str]) -> TempDir {
            let temp = TempDir::new().unwrap();
            let bin = temp.path().join("venv/bin");
            fs::create_dir_all(&bin).unwrap();
            fs::write(bin.join("activate"), "").unwrap();

            let mut script = String::from("#!/bin/sh\n");
            for module in missing {
                script.push_str(&format!("[ \"$2\" = \"import {}\" ] && exit 1\n", module));
            }
            script.push_str("exit 0\n");
            let python = bin.join("python");
            fs::write(&python, script).unwrap();
            fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();
            temp
        }

        #[test]
        fn all_installed_exits_zero() {
            let temp = project(&[]);
            let cmd = CheckCommand::new(temp.path(), CheckArgs::default());
            let mut ui = MockUI::new();

            let result = cmd.execute(&mut ui).unwrap();

            assert!(result.success);
            assert!(ui.has_success("Streamlit installed"));
            assert!(ui.has_success("All required packages are installed!"));
            assert_eq!(ui.spinners().len(), 5);
        }

        #[test]
        fn missing_package_exits_one() {
            let temp = project(&["plotly"]);
            let cmd = CheckCommand::new(temp.path(), CheckArgs::default());
            let mut ui = MockUI::new();

            let result = cmd.execute(&mut ui).unwrap();

            assert_eq!(result.exit_code, 1);
            assert!(ui.has_error("Plotly not installed"));
            assert!(ui.has_message("pip install plotly"));
        }

        #[test]
        fn json_output_lists_missing_modules() {
            let temp = project(&["requests"]);
            let cmd = CheckCommand::new(temp.path(), CheckArgs { json: true });
            let mut ui = MockUI::new();

            let result = cmd.execute(&mut ui).unwrap();

            assert_eq!(result.exit_code, 1);
            assert!(ui.spinners().is_empty());
            let json: serde_json::Value = serde_json::from_str(&ui.outputs()[0]).unwrap();
            assert_eq!(json["missing"], serde_json::json!(["requests"]));
            assert_eq!(json["packages"].as_array().unwrap().len(), 5);
        }

        #[test]
        fn json_output_survives_silent_mode() {
            let temp = project(&[]);
            let cmd = CheckCommand::new(temp.path(), CheckArgs { json: true });
            let mut ui = MockUI::with_mode(crate::ui::OutputMode::Silent);

            let result = cmd.execute(&mut ui).unwrap();

            assert!(result.success);
            assert_eq!(ui.outputs().len(), 1);
            assert!(ui.outputs()[0].contains("\"missing\": []"));
        }
    }
}
