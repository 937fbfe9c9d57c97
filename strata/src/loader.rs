//! Loading and merging configuration files.
//!
//! The loader resolves each input path to a parser by extension, parses it,
//! nests the content under the file's stem, and merges it into one tree key
//! by key. Files whose stem starts with `.` (for example `.env.json`) merge
//! at the root instead.
//!
//! Required paths are loaded first, in order, followed by optional paths that
//! exist. Later files win on overlapping dotted keys.
//!
//! # Examples
//!
//! ```
//! use std::fs;
//! use strata::{ConfigAccess, ConfigLoader, PathSpec};
//! use tempfile::TempDir;
//!
//! let dir = TempDir::new().unwrap();
//! let app = dir.path().join("app.json");
//! fs::write(&app, r#"{"name": "demo", "port": 8080}"#).unwrap();
//!
//! let mut loader = ConfigLoader::new();
//! let config = loader
//!     .load(&app, PathSpec::default())
//!     .unwrap();
//!
//! assert_eq!(config.get("app.port").unwrap(), 8080);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::{Config, ReadOnlyConfig};
use crate::error::{Error, Result};
use crate::keypath;
use crate::parser::{Parser, ParserRegistry};

/// Marker prefix of stems that merge at the root.
const GLOBAL_PREFIX: char = '.';

/// A path input: either an explicit ordered list or a single path.
///
/// A single path naming a directory expands to the directory's immediate
/// entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// An explicit list, used as is.
    Many(Vec<PathBuf>),
    /// A single file or directory.
    One(PathBuf),
}

impl Default for PathSpec {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<PathBuf> for PathSpec {
    fn from(path: PathBuf) -> Self {
        Self::One(path)
    }
}

impl From<&Path> for PathSpec {
    fn from(path: &Path) -> Self {
        Self::One(path.to_path_buf())
    }
}

impl From<&PathBuf> for PathSpec {
    fn from(path: &PathBuf) -> Self {
        Self::One(path.clone())
    }
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        Self::One(PathBuf::from(path))
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        Self::One(PathBuf::from(path))
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for PathSpec {
    fn from(paths: Vec<P>) -> Self {
        Self::Many(paths.into_iter().map(Into::into).collect())
    }
}

/// Expand a path input into an ordered list of paths.
///
/// A list is returned unchanged. A single directory expands to its immediate
/// entries sorted by file name. Any other single path becomes a one-element
/// list, whether or not it exists.
///
/// # Errors
///
/// Returns [`Error::Io`] if a directory cannot be listed.
pub fn resolve_paths(spec: PathSpec) -> Result<Vec<PathBuf>> {
    match spec {
        PathSpec::Many(paths) => Ok(paths),
        PathSpec::One(path) if path.is_dir() => {
            let mut entries = fs::read_dir(&path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()?;
            entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            Ok(entries)
        }
        PathSpec::One(path) => Ok(vec![path]),
    }
}

/// Split a file name at its last `.` into `(stem, extension)`.
fn split_file_name(path: &Path) -> Result<(&str, &str)> {
    let name = path.file_name().ok_or_else(|| Error::ExtensionMissing {
        path: path.to_path_buf(),
    })?;
    let name = name.to_str().ok_or_else(|| Error::InvalidFileName {
        path: path.to_path_buf(),
    })?;
    name.rsplit_once('.').ok_or_else(|| Error::ExtensionMissing {
        path: path.to_path_buf(),
    })
}

/// Loads configuration files through a [`ParserRegistry`].
#[derive(Debug, Default)]
pub struct ConfigLoader {
    registry: ParserRegistry,
}

impl ConfigLoader {
    /// Create a loader with the built-in parsers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ParserRegistry::new())
    }

    /// Create a loader around an existing registry.
    #[must_use]
    pub fn with_registry(registry: ParserRegistry) -> Self {
        Self { registry }
    }

    /// The parser registry.
    #[must_use]
    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    /// Mutable access to the parser registry.
    pub fn registry_mut(&mut self) -> &mut ParserRegistry {
        &mut self.registry
    }

    /// Register a constructed parser. See [`ParserRegistry::set_parser`].
    pub fn set_parser(&mut self, extension: impl Into<String>, parser: Arc<dyn Parser>) {
        self.registry.set_parser(extension, parser);
    }

    /// Register a deferred parser. See [`ParserRegistry::set_factory`].
    pub fn set_factory<F>(&mut self, extension: impl Into<String>, factory: F)
    where
        F: Fn(&mut ParserRegistry) -> Result<Arc<dyn Parser>> + Send + Sync + 'static,
    {
        self.registry.set_factory(extension, factory);
    }

    /// Register an untyped deferred parser. See
    /// [`ParserRegistry::set_dyn_factory`].
    pub fn set_dyn_factory<F>(&mut self, extension: impl Into<String>, factory: F)
    where
        F: Fn(&mut ParserRegistry) -> Result<Box<dyn std::any::Any>> + Send + Sync + 'static,
    {
        self.registry.set_dyn_factory(extension, factory);
    }

    /// See [`ParserRegistry::has_parser`].
    #[must_use]
    pub fn has_parser(&self, extension: &str) -> bool {
        self.registry.has_parser(extension)
    }

    /// See [`ParserRegistry::get_parser`].
    ///
    /// # Errors
    ///
    /// Propagates resolution errors from the registry.
    pub fn get_parser(&mut self, extension: &str) -> Result<Arc<dyn Parser>> {
        self.registry.get_parser(extension)
    }

    /// See [`ParserRegistry::supported_extensions`].
    #[must_use]
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.registry.supported_extensions()
    }

    /// Load `required` then the existing `optional` paths into one tree.
    ///
    /// # Errors
    ///
    /// Any error from a required path is returned. Optional paths that are
    /// not regular files are skipped; other errors from them are returned.
    pub fn load_paths(
        &mut self,
        required: impl Into<PathSpec>,
        optional: impl Into<PathSpec>,
    ) -> Result<Value> {
        let required = resolve_paths(required.into())?;
        let optional = resolve_paths(optional.into())?;

        let mut tree = Value::Object(Map::new());
        for path in &required {
            self.load_path(path, &mut tree)?;
        }
        for path in &optional {
            if path.is_file() {
                self.load_path(path, &mut tree)?;
            } else {
                log::debug!("Skipping missing optional path {}", path.display());
            }
        }

        Ok(tree)
    }

    /// Load and merge, wrapped in a mutable [`Config`].
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_paths`].
    pub fn load(
        &mut self,
        required: impl Into<PathSpec>,
        optional: impl Into<PathSpec>,
    ) -> Result<Config> {
        self.load_paths(required, optional).map(Config::new)
    }

    /// Load and merge, wrapped in a caching [`ReadOnlyConfig`].
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_paths`].
    pub fn read(
        &mut self,
        required: impl Into<PathSpec>,
        optional: impl Into<PathSpec>,
    ) -> Result<ReadOnlyConfig> {
        self.load_paths(required, optional).map(ReadOnlyConfig::new)
    }

    /// Parse one file and merge it into `tree`.
    ///
    /// # Errors
    ///
    /// - [`Error::FileNotFound`] if `path` is not a regular file
    /// - [`Error::ExtensionMissing`] if the file name has no `.`
    /// - [`Error::InvalidFileName`] if the file name is not valid UTF-8
    /// - [`Error::NotAnArray`] if the file content is not a map or sequence
    /// - registry and parser errors
    pub fn load_path(&mut self, path: &Path, tree: &mut Value) -> Result<()> {
        if !path.is_file() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let (stem, extension) = split_file_name(path)?;

        let parser = self.registry.get_parser(extension)?;
        let content = parser.parse(path)?;
        if !keypath::is_container(&content) {
            return Err(Error::NotAnArray {
                subject: path.display().to_string(),
            });
        }

        let content = if stem.is_empty() || stem.starts_with(GLOBAL_PREFIX) {
            content
        } else {
            let mut wrapped = Map::new();
            wrapped.insert(stem.to_string(), content);
            Value::Object(wrapped)
        };

        let entries = keypath::dot(&content, "");
        log::debug!("Loaded {} key(s) from {}", entries.len(), path.display());
        for (key, value) in entries {
            keypath::set(tree, Some(&key), value);
        }

        Ok(())
    }
}
