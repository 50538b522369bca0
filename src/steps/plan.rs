//! The fixed step sequence.

use std::fmt;
use std::path::PathBuf;

use crate::config::{ActivationMode, PyprepConfig};

/// One step of the setup sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print a status message.
    Announce { message: String },

    /// Activate the virtual environment for all later steps.
    Activate {
        path: PathBuf,
        mode: ActivationMode,
    },

    /// Run the package installer.
    Install { program: String, args: Vec<String> },

    /// Run the verification script.
    Verify {
        script: PathBuf,
        interpreter: Option<String>,
    },
}

impl Step {
    /// Short name used in results and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Announce { .. } => "announce",
            Step::Activate { .. } => "activate",
            Step::Install { .. } => "install",
            Step::Verify { .. } => "verify",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Announce { message } => write!(f, "echo {}", message),
            Step::Activate { path, .. } => {
                write!(f, ". {}", path.join(crate::shell::env_bin_dir()).join("activate").display())
            }
            Step::Install { program, args } => {
                write!(f, "{}", crate::shell::format_command(program, args))
            }
            Step::Verify {
                script,
                interpreter,
            } => match interpreter {
                Some(interp) => write!(f, "{} {}", interp, script.display()),
                None => write!(f, "{}", script_invocation(script).display()),
            },
        }
    }
}

/// How a bare relative script name is invoked: `./name`, never a PATH lookup.
pub fn script_invocation(script: &std::path::Path) -> PathBuf {
    if script.is_absolute() || script.components().count() > 1 {
        script.to_path_buf()
    } else {
        PathBuf::from(".").join(script)
    }
}

/// The ordered steps of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    /// Build the sequence: announce, activate, install, announce, verify.
    pub fn from_config(config: &PyprepConfig) -> Self {
        let steps = vec![
            Step::Announce {
                message: config.messages.installing.clone(),
            },
            Step::Activate {
                path: config.environment.path.clone(),
                mode: config.environment.activation,
            },
            Step::Install {
                program: config.installer.program.clone(),
                args: config.installer.argv(),
            },
            Step::Announce {
                message: config.messages.verifying.clone(),
            },
            Step::Verify {
                script: config.verify.script.clone(),
                interpreter: config.verify.interpreter.clone(),
            },
        ];
        Self { steps }
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_order() {
        let plan = Plan::from_config(&PyprepConfig::default());
        let names: Vec<_> = plan.steps().iter().map(Step::name).collect();
        assert_eq!(
            names,
            vec!["announce", "activate", "install", "announce", "verify"]
        );
    }

    #[test]
    fn default_install_uses_three_packages() {
        let plan = Plan::from_config(&PyprepConfig::default());
        match &plan.steps()[2] {
            Step::Install { program, args } => {
                assert_eq!(program, "pip");
                assert_eq!(args, &["install", "streamlit", "pandas", "openpyxl"]);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn display_renders_shell_equivalents() {
        let plan = Plan::from_config(&PyprepConfig::default());
        let lines: Vec<_> = plan.steps().iter().map(|s| s.to_string()).collect();
        assert_eq!(lines[1], ". venv/bin/activate");
        assert_eq!(lines[2], "pip install streamlit pandas openpyxl");
        assert_eq!(lines[4], "./check_dependencies.py");
    }

    #[test]
    fn script_invocation_only_prefixes_bare_names() {
        assert_eq!(
            script_invocation(std::path::Path::new("check.py")),
            PathBuf::from("./check.py")
        );
        assert_eq!(
            script_invocation(std::path::Path::new("scripts/check.py")),
            PathBuf::from("scripts/check.py")
        );
    }
}
