//! Integration tests for config module public API.

use pyprep::config::{
    load_config, load_merged_config, validate, validate_config, ActivationMode, FailurePolicy,
    OutputMode, PyprepConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn defaults_reproduce_the_setup_script() {
    let config = PyprepConfig::default();

    assert_eq!(config.environment.path, PathBuf::from("venv"));
    assert_eq!(config.environment.activation, ActivationMode::Native);
    assert_eq!(
        config.installer.argv(),
        vec!["install", "streamlit", "pandas", "openpyxl"]
    );
    assert_eq!(config.verify.script, PathBuf::from("check_dependencies.py"));
    assert_eq!(config.settings.on_failure, FailurePolicy::Continue);
    assert!(validate_config(&config).is_empty());
}

#[test]
fn local_overrides_merge_over_project_config() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        ".pyprep/config.yml",
        r#"
environment:
  path: .venv
installer:
  packages: [requests]
settings:
  default_output: verbose
"#,
    );
    write(
        temp.path(),
        ".pyprep/config.local.yml",
        "settings:\n  on_failure: halt\n",
    );

    let config = load_merged_config(temp.path()).unwrap();
    validate(&config).unwrap();

    assert_eq!(config.environment.path, PathBuf::from(".venv"));
    assert_eq!(config.installer.packages, vec!["requests"]);
    assert_eq!(config.settings.on_failure, FailurePolicy::Halt);
    assert_eq!(config.settings.default_output, OutputMode::Verbose);
}

#[test]
fn explicit_config_file_skips_discovery() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".pyprep/config.yml", "installer:\n  program: uv\n");
    write(temp.path(), "ci.yml", "installer:\n  program: pip3\n");

    let config = load_config(temp.path(), Some(Path::new("ci.yml"))).unwrap();

    assert_eq!(config.installer.program, "pip3");
}

#[test]
fn requirements_file_is_appended() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        ".pyprep/config.yml",
        "installer:\n  packages: []\n  requirements_file: requirements.txt\n",
    );

    let config = load_merged_config(temp.path()).unwrap();

    assert_eq!(
        config.installer.argv(),
        vec!["install", "-r", "requirements.txt"]
    );
}
