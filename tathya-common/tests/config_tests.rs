//! Unit tests for configuration and root folder resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate TATHYA_ROOT_FOLDER are marked with #[serial]
//! to ensure they run sequentially, not in parallel.

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tathya_common::config::{
    database_path, default_root_folder, load_toml_config, resolve_root_folder, uploads_dir,
    TomlConfig, ENV_ROOT_FOLDER,
};

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ENV_ROOT_FOLDER);

    let config = TomlConfig::default();
    let root = resolve_root_folder(None, &config);

    assert!(!root.as_os_str().is_empty());
    assert_eq!(root, default_root_folder());
}

#[test]
#[serial]
fn test_resolver_env_var_beats_toml() {
    let test_path = "/tmp/tathya-test-env-folder";
    env::set_var(ENV_ROOT_FOLDER, test_path);

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/tathya-test-toml-folder")),
        ..TomlConfig::default()
    };
    let root = resolve_root_folder(None, &config);

    env::remove_var(ENV_ROOT_FOLDER);
    assert_eq!(root, PathBuf::from(test_path));
}

#[test]
#[serial]
fn test_resolver_cli_arg_beats_everything() {
    env::set_var(ENV_ROOT_FOLDER, "/tmp/tathya-test-env-folder");

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/tathya-test-toml-folder")),
        ..TomlConfig::default()
    };
    let cli = PathBuf::from("/tmp/tathya-test-cli-folder");
    let root = resolve_root_folder(Some(&cli), &config);

    env::remove_var(ENV_ROOT_FOLDER);
    assert_eq!(root, cli);
}

#[test]
#[serial]
fn test_resolver_toml_beats_default() {
    env::remove_var(ENV_ROOT_FOLDER);

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/tathya-test-toml-folder")),
        ..TomlConfig::default()
    };
    let root = resolve_root_folder(None, &config);

    assert_eq!(root, PathBuf::from("/tmp/tathya-test-toml-folder"));
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() {
    let config = load_toml_config(Some(&PathBuf::from("/nonexistent/tathya.toml"))).unwrap();

    assert!(config.root_folder.is_none());
    assert_eq!(config.api_port, 8000);
    assert_eq!(config.ui_port, 8080);
    assert!(config.analyzer_url.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_file_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tathya.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/tathya"
api_port = 9100
analyzer_url = "http://analysis.internal:9000"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_toml_config(Some(&path)).unwrap();

    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/tathya")));
    assert_eq!(config.api_port, 9100);
    // Unset keys keep their defaults
    assert_eq!(config.ui_port, 8080);
    assert_eq!(
        config.analyzer_url.as_deref(),
        Some("http://analysis.internal:9000")
    );
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tathya.toml");
    std::fs::write(&path, "api_port = \"not a number\"").unwrap();

    assert!(load_toml_config(Some(&path)).is_err());
}

#[test]
fn test_derived_paths_under_root() {
    let root = PathBuf::from("/srv/tathya");
    assert_eq!(database_path(&root), PathBuf::from("/srv/tathya/tathya.db"));
    assert_eq!(
        uploads_dir(&root),
        PathBuf::from("/srv/tathya/Uploaded_files")
    );
}
