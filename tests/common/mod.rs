//! Common test utilities

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A catalog with one environment and one application
pub const SMALL_CATALOG: &str = r#"
environments:
  - name: test
    description: Test environment
    aliases: [stage]
applications:
  - name: web
    description: Web frontend
"#;

/// Create a temporary directory with a drl.yml file
pub fn create_test_catalog(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("drl.yml");
    fs::write(&catalog_path, content).unwrap();
    (temp_dir, catalog_path)
}

/// Create a test catalog with a subdirectory below it
pub fn create_test_catalog_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let (temp_dir, catalog_path) = create_test_catalog(content);
    let sub_dir = temp_dir.path().join("subdir");
    fs::create_dir(&sub_dir).unwrap();
    (temp_dir, catalog_path, sub_dir)
}

/// The `drl` binary running in `dir`, isolated from the user's environment
pub fn drl_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("drl").unwrap();
    cmd.current_dir(dir)
        .env_remove("DRL_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}
