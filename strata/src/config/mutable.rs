//! The mutable configuration accessor.

use std::ops::{Index, IndexMut};

use serde_json::{Map, Value};

use super::{require_key, ConfigAccess, ReadOnlyConfig};
use crate::error::{Error, Result};
use crate::keypath;

pub(super) static NULL: Value = Value::Null;

/// A merged configuration tree that can be read and written by dotted key.
///
/// Indexing with a missing key yields `null`, like `serde_json::Value`.
/// Mutable indexing creates the slot the way [`ConfigAccess::set`] would.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    tree: Value,
}

impl Config {
    /// Wrap an existing tree.
    #[must_use]
    pub fn new(tree: Value) -> Self {
        Self { tree }
    }

    /// Convert into a caching, read-only configuration.
    #[must_use]
    pub fn freeze(self) -> ReadOnlyConfig {
        ReadOnlyConfig::new(self.tree)
    }

    /// Take the underlying tree.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.tree
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

impl From<Value> for Config {
    fn from(tree: Value) -> Self {
        Self::new(tree)
    }
}

impl ConfigAccess for Config {
    fn has(&self, key: &str) -> bool {
        !key.is_empty() && keypath::has(&self.tree, Some(key))
    }

    fn get(&self, key: &str) -> Result<Value> {
        keypath::get(&self.tree, Some(require_key(key)?), None).cloned()
    }

    fn get_or(&self, key: &str, default: Value) -> Result<Value> {
        keypath::get(&self.tree, Some(require_key(key)?), Some(&default)).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        keypath::set(&mut self.tree, Some(require_key(key)?), value);
        Ok(())
    }

    fn all(&self) -> &Value {
        &self.tree
    }
}

impl Index<&str> for Config {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        keypath::get(&self.tree, Some(key), None).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Config {
    /// # Panics
    ///
    /// Panics if `key` is empty.
    fn index_mut(&mut self, key: &str) -> &mut Value {
        assert!(!key.is_empty(), "{}", Error::InvalidKey);
        keypath::entry(&mut self.tree, key)
    }
}
