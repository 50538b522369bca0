//! Import probing.

use std::path::{Path, PathBuf};

use crate::config::RequiredPackage;
use crate::environment::ActivatedEnv;
use crate::error::Result;
use crate::shell::execute_quiet;

/// Interpreter names tried on PATH, in order.
const INTERPRETERS: &[&str] = &["python", "python3"];

/// Whether a module could be imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    Installed,
    Missing,
}

/// Outcome of checking one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCheck {
    /// The package that was checked.
    pub package: RequiredPackage,
    /// Whether it imported.
    pub status: ImportStatus,
}

impl PackageCheck {
    /// Whether the import succeeded.
    pub fn is_installed(&self) -> bool {
        self.status == ImportStatus::Installed
    }
}

/// Find the Python interpreter for `env`.
///
/// Prefers the activated environment's own interpreter, then the first of
/// `python`/`python3` on the environment's PATH.
pub fn find_interpreter(env: &ActivatedEnv, cwd: &Path) -> Option<PathBuf> {
    INTERPRETERS
        .iter()
        .find_map(|name| env.resolve_program(name, cwd))
}

/// Checks required packages by importing them.
pub struct DependencyChecker<'a> {
    interpreter: PathBuf,
    env: &'a ActivatedEnv,
    cwd: &'a Path,
}

impl<'a> DependencyChecker<'a> {
    /// Create a checker using `interpreter` inside `env`.
    pub fn new(interpreter: PathBuf, env: &'a ActivatedEnv, cwd: &'a Path) -> Self {
        Self {
            interpreter,
            env,
            cwd,
        }
    }

    /// The interpreter in use.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Check one package with `python -c "import <module>"`.
    pub fn check(&self, package: &RequiredPackage) -> Result<PackageCheck> {
        let args = vec!["-c".to_string(), format!("import {}", package.module)];
        let result = execute_quiet(&self.interpreter, &args, Some(self.env.vars()), Some(self.cwd))?;

        let status = if result.success {
            ImportStatus::Installed
        } else {
            tracing::debug!(
                "import {} failed ({}): {}",
                package.module,
                result.exit_code,
                result.stderr.trim()
            );
            ImportStatus::Missing
        };

        Ok(PackageCheck {
            package: package.clone(),
            status,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::shell::EnvVars;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// A fake interpreter whose imports fail for the modules named in `missing`.
    fn fake_python(dir: &Path, missing: &[&str]) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let mut script = String::from("#!/bin/sh\n");
        for module in missing {
            script.push_str(&format!("[ \"$2\" = \"import {}\" ] && exit 1\n", module));
        }
        script.push_str("exit 0\n");
        let path = dir.join("python");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn env_with_path(dir: &Path) -> ActivatedEnv {
        let mut vars = EnvVars::new();
        vars.insert("PATH".into(), format!("{}:/usr/bin:/bin", dir.display()).into());
        ActivatedEnv::ambient(vars)
    }

    #[test]
    fn finds_interpreter_on_env_path() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        let python = fake_python(&bin, &[]);

        let env = env_with_path(&bin);
        assert_eq!(find_interpreter(&env, temp.path()), Some(python));
    }

    #[test]
    fn no_interpreter_on_empty_path() {
        let temp = TempDir::new().unwrap();
        let mut vars = EnvVars::new();
        vars.insert("PATH".into(), temp.path().as_os_str().to_os_string());
        let env = ActivatedEnv::ambient(vars);

        assert_eq!(find_interpreter(&env, temp.path()), None);
    }

    #[test]
    fn check_distinguishes_installed_and_missing() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        let python = fake_python(&bin, &["plotly"]);
        let env = env_with_path(&bin);
        let checker = DependencyChecker::new(python, &env, temp.path());

        let pandas = checker
            .check(&RequiredPackage::new("pandas", "Pandas"))
            .unwrap();
        let plotly = checker
            .check(&RequiredPackage::new("plotly", "Plotly"))
            .unwrap();

        assert!(pandas.is_installed());
        assert_eq!(plotly.status, ImportStatus::Missing);
    }
}
