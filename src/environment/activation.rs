//! Scoped virtual environment activation.
//!
//! Activation never touches this process's environment. It produces an
//! [`ActivatedEnv`]: the complete variable map that every later subprocess
//! is spawned with.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::ActivationMode;
use crate::error::{PyprepError, Result};
use crate::shell::{execute_quiet, posix_shell, EnvVars};

use super::path::{join_path, resolve_program, split_path};
use super::virtualenv::VirtualEnv;

/// Variables that only describe the sourcing shell itself.
const SHELL_NOISE: &[&str] = &["_", "SHLVL", "PWD", "OLDPWD"];

/// The environment handed to subprocesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedEnv {
    vars: EnvVars,
    virtual_env: Option<PathBuf>,
}

impl ActivatedEnv {
    /// An environment with no isolation: the base variables unchanged.
    pub fn ambient(base: EnvVars) -> Self {
        Self {
            vars: base,
            virtual_env: None,
        }
    }

    /// Activate `venv` on top of `base` using the given mode.
    pub fn activate(
        venv: &VirtualEnv,
        mode: ActivationMode,
        base: EnvVars,
        cwd: &Path,
    ) -> Result<Self> {
        match mode {
            ActivationMode::Native => Ok(Self::native(venv, base)),
            ActivationMode::Source => Self::source(venv, base, cwd),
        }
    }

    /// Compute the activated variables the way the stock `activate` script does.
    pub fn native(venv: &VirtualEnv, mut base: EnvVars) -> Self {
        let mut path = vec![venv.bin_dir()];
        if let Some(existing) = base.get(OsStr::new("PATH")) {
            path.extend(split_path(existing));
        }

        base.insert("PATH".into(), join_path(&path));
        base.insert("VIRTUAL_ENV".into(), venv.root().as_os_str().to_os_string());
        base.insert("VIRTUAL_ENV_PROMPT".into(), venv.prompt().into());
        base.remove(OsStr::new("PYTHONHOME"));

        tracing::debug!(
            "Native activation of {} (PATH head {})",
            venv.root().display(),
            venv.bin_dir().display()
        );

        Self {
            vars: base,
            virtual_env: Some(venv.root().to_path_buf()),
        }
    }

    /// Source the environment's activation script and capture the result.
    ///
    /// # Errors
    ///
    /// Returns `ActivationFailed` if the script exits non-zero or the shell
    /// cannot be started.
    pub fn source(venv: &VirtualEnv, base: EnvVars, cwd: &Path) -> Result<Self> {
        let script = venv.activate_script();
        let args = vec![
            "-c".to_string(),
            r#". "$1" >/dev/null 2>&1 && env -0"#.to_string(),
            "pyprep-activate".to_string(),
            script.display().to_string(),
        ];

        let result = execute_quiet(Path::new(posix_shell()), &args, Some(&base), Some(cwd))?;

        if !result.success {
            let message = match &result.spawn_error {
                Some(reason) => format!("{}: {}", posix_shell(), reason),
                None => format!("activation exited with code {}", result.exit_code),
            };
            return Err(PyprepError::ActivationFailed {
                path: script,
                message,
            });
        }

        let vars = parse_env_dump(&result.stdout_raw);
        tracing::debug!(
            "Sourced {} ({} variables)",
            script.display(),
            vars.len()
        );

        let virtual_env = vars
            .get(OsStr::new("VIRTUAL_ENV"))
            .map(PathBuf::from)
            .or_else(|| Some(venv.root().to_path_buf()));

        Ok(Self { vars, virtual_env })
    }

    /// All variables.
    pub fn vars(&self) -> &EnvVars {
        &self.vars
    }

    /// Look up one variable as the OS stores it.
    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// Look up one variable whose value is valid UTF-8.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_os(key).and_then(OsStr::to_str)
    }

    /// The activated environment root, if any.
    pub fn virtual_env(&self) -> Option<&Path> {
        self.virtual_env.as_deref()
    }

    /// Whether a virtual environment is active.
    pub fn is_isolated(&self) -> bool {
        self.virtual_env.is_some()
    }

    /// PATH entries of this environment, in search order.
    pub fn path_entries(&self) -> Vec<PathBuf> {
        self.get_os("PATH").map(split_path).unwrap_or_default()
    }

    /// Resolve a program against this environment's PATH.
    pub fn resolve_program(&self, program: &str, cwd: &Path) -> Option<PathBuf> {
        resolve_program(program, cwd, &self.path_entries())
    }
}

/// Parse the output of `env -0`.
fn parse_env_dump(dump: &[u8]) -> EnvVars {
    dump.split(|b| *b == 0)
        .filter_map(|entry| {
            let eq = entry.iter().position(|b| *b == b'=')?;
            Some((&entry[..eq], &entry[eq + 1..]))
        })
        .filter(|(key, _)| !key.is_empty() && !SHELL_NOISE.iter().any(|n| n.as_bytes() == *key))
        .map(|(key, value)| (os_from_bytes(key), os_from_bytes(value)))
        .collect()
}

#[cfg(unix)]
fn os_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn os_from_bytes(bytes: &[u8]) -> OsString {
    String::from_utf8_lossy(bytes).into_owned().into()
}
