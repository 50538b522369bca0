//! Executable lookup over an explicit list of PATH entries.
//!
//! Lookups never consult this process's own `PATH`: callers pass the entries
//! of the environment the child will actually run in.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::shell::executable_names;

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Split a PATH-style value into directories.
pub fn split_path(value: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(value).collect()
}

/// Join directories into a PATH-style value.
///
/// Entries that cannot be joined (they contain the separator) are dropped.
pub fn join_path(entries: &[PathBuf]) -> OsString {
    let usable: Vec<&PathBuf> = entries
        .iter()
        .filter(|e| std::env::join_paths([e.as_os_str()]).is_ok())
        .collect();
    std::env::join_paths(usable).unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = executable_names(tool);
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Resolve a program name the way a shell would.
///
/// Names containing a path separator are taken relative to `cwd` and
/// returned if they exist; bare names are searched in `path_entries`.
pub fn resolve_program(program: &str, cwd: &Path, path_entries: &[PathBuf]) -> Option<PathBuf> {
    if program.contains('/') || program.contains(std::path::MAIN_SEPARATOR) {
        let candidate = cwd.join(program);
        return candidate.exists().then_some(candidate);
    }
    resolve_tool_path(program, path_entries)
}
