//! Platform-specific details.

/// Directory inside a virtual environment that holds its executables.
pub fn env_bin_dir() -> &'static str {
    if cfg!(target_os = "windows") {
        "Scripts"
    } else {
        "bin"
    }
}

/// Shell used to source activation scripts.
pub fn posix_shell() -> &'static str {
    "/bin/sh"
}

/// Candidate file names for an executable, in lookup order.
pub fn executable_names(tool: &str) -> Vec<String> {
    if cfg!(target_os = "windows") && !tool.contains('.') {
        vec![format!("{}.exe", tool), format!("{}.bat", tool), tool.to_string()]
    } else {
        vec![tool.to_string()]
    }
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive output in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn unix_layout() {
        assert_eq!(env_bin_dir(), "bin");
        assert_eq!(executable_names("pip"), vec!["pip"]);
    }

    #[cfg(windows)]
    #[test]
    fn windows_layout() {
        assert_eq!(env_bin_dir(), "Scripts");
        assert_eq!(executable_names("pip")[0], "pip.exe");
    }

    #[test]
    fn names_with_extension_are_kept() {
        assert_eq!(executable_names("tool.cmd"), vec!["tool.cmd"]);
    }

    #[test]
    fn is_ci_does_not_panic() {
        let _ = is_ci();
    }
}
