//! The caching, read-only configuration accessor.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Index;

use serde_json::{Map, Value};

use super::mutable::NULL;
use super::{require_key, ConfigAccess};
use crate::error::{Error, Result};
use crate::keypath;

/// A merged configuration tree that can only be read.
///
/// Every distinct key is resolved against the tree at most once per
/// operation; later reads are served from a cache that lives as long as the
/// instance. All mutation entry points fail with [`Error::WriteNotAllowed`].
///
/// The caches use interior mutability, so this type is not `Sync`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::{ConfigAccess, Error, ReadOnlyConfig};
///
/// let mut config = ReadOnlyConfig::new(json!({"mode": "strict"}));
///
/// assert!(matches!(
///     config.set("mode", json!("lax")),
///     Err(Error::WriteNotAllowed)
/// ));
/// assert_eq!(config.get("mode").unwrap(), "strict");
/// ```
#[derive(Debug, Clone)]
pub struct ReadOnlyConfig {
    tree: Value,
    has_cache: RefCell<HashMap<String, bool>>,
    get_cache: RefCell<HashMap<String, Option<Value>>>,
}

impl ReadOnlyConfig {
    /// Wrap an existing tree.
    #[must_use]
    pub fn new(tree: Value) -> Self {
        Self {
            tree,
            has_cache: RefCell::new(HashMap::new()),
            get_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct keys memoized so far.
    #[must_use]
    pub fn cached_keys(&self) -> usize {
        self.has_cache.borrow().len() + self.get_cache.borrow().len()
    }

    /// Take the underlying tree.
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.tree
    }

    /// Resolve `key` into the cache once, reporting whether it exists.
    fn memoize(&self, key: &str) -> bool {
        if let Some(cached) = self.get_cache.borrow().get(key) {
            return cached.is_some();
        }

        let found = keypath::get(&self.tree, Some(key), None).ok().cloned();
        let present = found.is_some();
        self.get_cache.borrow_mut().insert(key.to_string(), found);
        present
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        if !self.memoize(key) {
            return None;
        }
        self.get_cache.borrow().get(key).cloned().flatten()
    }
}

impl From<Value> for ReadOnlyConfig {
    fn from(tree: Value) -> Self {
        Self::new(tree)
    }
}

impl ConfigAccess for ReadOnlyConfig {
    fn has(&self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        if let Some(&present) = self.has_cache.borrow().get(key) {
            return present;
        }

        let present = keypath::has(&self.tree, Some(key));
        self.has_cache.borrow_mut().insert(key.to_string(), present);
        present
    }

    fn get(&self, key: &str) -> Result<Value> {
        let key = require_key(key)?;
        self.lookup(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    fn get_or(&self, key: &str, default: Value) -> Result<Value> {
        let key = require_key(key)?;
        self.lookup(key)
            .or_else(|| Some(default).filter(|d| !d.is_null()))
            .ok_or_else(|| Error::KeyNotFound {
                key: key.to_string(),
            })
    }

    fn set(&mut self, _key: &str, _value: Value) -> Result<()> {
        Err(Error::WriteNotAllowed)
    }

    fn set_many(&mut self, _values: Map<String, Value>) -> Result<()> {
        Err(Error::WriteNotAllowed)
    }

    fn prepend(&mut self, _key: &str, _value: Value) -> Result<()> {
        Err(Error::WriteNotAllowed)
    }

    fn push(&mut self, _key: &str, _value: Value) -> Result<()> {
        Err(Error::WriteNotAllowed)
    }

    fn unset(&mut self, _key: &str) -> Result<()> {
        Err(Error::WriteNotAllowed)
    }

    fn all(&self) -> &Value {
        &self.tree
    }
}

impl Index<&str> for ReadOnlyConfig {
    type Output = Value;

    /// Misses are answered from the cache. Hits borrow from the tree, which
    /// never changes after construction.
    fn index(&self, key: &str) -> &Value {
        if key.is_empty() || !self.memoize(key) {
            return &NULL;
        }
        keypath::get(&self.tree, Some(key), None).unwrap_or(&NULL)
    }
}
