//! Merged configuration accessors.
//!
//! A loaded tree is wrapped either in a mutable [`Config`] or in a
//! [`ReadOnlyConfig`] that memoizes lookups and rejects writes. Both expose
//! the same dotted-key surface through the [`ConfigAccess`] trait.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use strata::{Config, ConfigAccess};
//!
//! let mut config = Config::new(json!({"server": {"hosts": ["a"]}}));
//!
//! config.push("server.hosts", json!("b")).unwrap();
//! config.set("server.port", json!(8080)).unwrap();
//!
//! assert_eq!(config.get("server.hosts").unwrap(), json!(["a", "b"]));
//! assert_eq!(config["server.port"], 8080);
//!
//! let frozen = config.freeze();
//! assert!(frozen.has("server.port"));
//! ```

mod mutable;
mod read_only;

pub use mutable::Config;
pub use read_only::ReadOnlyConfig;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Dotted-key access to a configuration tree.
///
/// Keys must be non-empty. Values are returned by value so the read-only
/// implementation can serve them from its cache.
pub trait ConfigAccess {
    /// Check whether `key` resolves. An empty key is never present.
    fn has(&self, key: &str) -> bool;

    /// Look up `key`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`] for an empty key, [`Error::KeyNotFound`] if the
    /// key does not resolve.
    fn get(&self, key: &str) -> Result<Value>;

    /// Look up `key`, falling back to `default` when it does not resolve.
    ///
    /// A `null` default counts as no default; use [`ConfigAccess::has`] to
    /// tell a missing key from a stored `null`.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigAccess::get`] when no usable default is given.
    fn get_or(&self, key: &str, default: Value) -> Result<Value>;

    /// Write `value` at `key`, creating intermediate objects.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`] for an empty key, [`Error::WriteNotAllowed`] on
    /// a read-only configuration.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// The whole tree.
    fn all(&self) -> &Value;

    /// Write every entry of `values` in iteration order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing [`ConfigAccess::set`].
    fn set_many(&mut self, values: Map<String, Value>) -> Result<()> {
        for (key, value) in values {
            self.set(&key, value)?;
        }
        Ok(())
    }

    /// Insert `value` at the front of the sequence stored at `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` does not resolve,
    /// [`Error::NotAnArray`] if it does not hold a sequence.
    fn prepend(&mut self, key: &str, value: Value) -> Result<()> {
        let mut items = sequence_at(self.get(key)?, key)?;
        items.insert(0, value);
        self.set(key, Value::Array(items))
    }

    /// Append `value` to the sequence stored at `key`.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigAccess::prepend`].
    fn push(&mut self, key: &str, value: Value) -> Result<()> {
        let mut items = sequence_at(self.get(key)?, key)?;
        items.push(value);
        self.set(key, Value::Array(items))
    }

    /// Store `null` at `key`. The key stays present.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigAccess::set`].
    fn unset(&mut self, key: &str) -> Result<()> {
        self.set(key, Value::Null)
    }

    /// Look up `key` and deserialize it into `T`.
    ///
    /// # Errors
    ///
    /// Lookup errors from [`ConfigAccess::get`], or [`Error::Deserialize`]
    /// if the value does not fit `T`.
    fn extract<T: DeserializeOwned>(&self, key: &str) -> Result<T>
    where
        Self: Sized,
    {
        serde_json::from_value(self.get(key)?).map_err(|source| Error::Deserialize {
            key: key.to_string(),
            source,
        })
    }
}

/// Reject the empty key.
pub(crate) fn require_key(key: &str) -> Result<&str> {
    if key.is_empty() {
        Err(Error::InvalidKey)
    } else {
        Ok(key)
    }
}

fn sequence_at(value: Value, key: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(Error::NotAnArray {
            subject: key.to_string(),
        }),
    }
}
