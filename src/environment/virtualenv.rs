//! Virtual environment layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PyprepError, Result};
use crate::shell::env_bin_dir;

/// A virtual environment directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEnv {
    root: PathBuf,
}

impl VirtualEnv {
    /// Describe the environment at `relative` under `project_root`.
    ///
    /// Does not check that anything exists.
    pub fn at(project_root: &Path, relative: &Path) -> Self {
        let joined = project_root.join(relative);
        let root = std::path::absolute(&joined).unwrap_or(joined);
        Self { root }
    }

    /// Locate an existing environment.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentNotFound` if the activation script is missing.
    pub fn locate(project_root: &Path, relative: &Path) -> Result<Self> {
        let venv = Self::at(project_root, relative);
        if venv.activate_script().is_file() {
            Ok(venv)
        } else {
            Err(PyprepError::EnvironmentNotFound {
                path: venv.activate_script(),
            })
        }
    }

    /// Absolute environment root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the environment's executables.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join(env_bin_dir())
    }

    /// The POSIX activation script.
    pub fn activate_script(&self) -> PathBuf {
        self.bin_dir().join("activate")
    }

    /// Prompt name: `prompt` from `pyvenv.cfg`, else the directory name.
    pub fn prompt(&self) -> String {
        self.configured_prompt().unwrap_or_else(|| {
            self.root
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        })
    }

    fn configured_prompt(&self) -> Option<String> {
        let content = fs::read_to_string(self.root.join("pyvenv.cfg")).ok()?;
        content.lines().find_map(|line| {
            let (key, value) = line.split_once('=')?;
            if key.trim() == "prompt" {
                let value = value.trim().trim_matches(|c| c == '\'' || c == '"');
                (!value.is_empty()).then(|| value.to_string())
            } else {
                None
            }
        })
    }
}
