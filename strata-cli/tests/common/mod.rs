//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary configuration directory
//! - Command builder helpers for common patterns

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated configuration directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new, empty test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Environment fallbacks are cleared so the host environment cannot leak
    /// into tests.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").expect("Failed to find strata binary");
        cmd.env_remove("STRATA_FILES")
            .env_remove("STRATA_OPTIONAL")
            .env_remove("STRATA_FORMAT")
            .env_remove("STRATA_LOG_MODE");
        cmd
    }

    /// Get a command builder that loads this environment's directory.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--file").arg(&self.temp_path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a configuration file and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create test directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Populate the environment with a small layered setup.
    ///
    /// - `app.json` defines `app.name`, `app.port` and `app.hosts`
    /// - `app.yaml` overrides `app.port`
    /// - `.env.toml` sets the root-level `stage`
    pub fn with_sample(self) -> Self {
        self.write_file(
            "app.json",
            r#"{"name": "demo", "port": 8080, "hosts": ["a", "b"]}"#,
        );
        self.write_file("app.yaml", "port: 9090\n");
        self.write_file(".env.toml", "stage = \"dev\"\n");
        self
    }
}
