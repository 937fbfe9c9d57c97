//! Common test utilities for integration tests.
//!
//! This module provides a fixture builder for directories of configuration
//! files.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory populated with configuration files.
///
/// The directory is removed when the fixture is dropped.
///
/// # Examples
///
/// ```no_run
/// # use common::ConfigDir;
/// let dir = ConfigDir::new()
///     .with_file("a.json", r#"{"x": 1}"#)
///     .with_file(".env.yaml", "debug: true\n");
/// let path = dir.path_of("a.json");
/// ```
pub struct ConfigDir {
    dir: TempDir,
}

#[allow(dead_code)]
impl ConfigDir {
    /// Creates an empty fixture directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temporary directory"),
        }
    }

    /// Writes `content` to `name`, creating parent directories.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        let path = self.path_of(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        self
    }

    /// Root of the fixture directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file inside the fixture.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Absolute paths of several files, in the given order.
    pub fn paths_of(&self, names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|name| self.path_of(name)).collect()
    }
}

/// Fixture with one file per supported format, all describing a service.
#[allow(dead_code)]
pub fn every_format() -> ConfigDir {
    ConfigDir::new()
        .with_file("toml_svc.toml", "name = \"toml\"\n[net]\nport = 1\n")
        .with_file("json_svc.json", r#"{"name": "json", "net": {"port": 2}}"#)
        .with_file("ini_svc.ini", "name = ini\n[net]\nport = 3\n")
        .with_file(
            "xml_svc.xml",
            "<config><name>xml</name><net><port>4</port></net></config>",
        )
        .with_file("yaml_svc.yaml", "name: yaml\nnet:\n  port: 5\n")
        .with_file("yml_svc.yml", "name: yml\nnet:\n  port: 6\n")
}
