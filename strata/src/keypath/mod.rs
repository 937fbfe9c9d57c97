//! Dotted key paths over nested configuration values.
//!
//! A dotted key such as `database.primary.port` addresses a value nested
//! several levels deep inside a configuration tree. This module provides the
//! primitive operations every other part of the library is built on:
//!
//! - [`has`]: existence check
//! - [`get`]: lookup with an optional default
//! - [`set`] and [`entry`]: writes that create missing intermediate objects
//! - [`dot`]: flattening a tree into `(dotted key, leaf)` pairs
//!
//! Passing `None` as the key addresses the whole tree.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use strata::keypath;
//!
//! let mut tree = json!({});
//! keypath::set(&mut tree, Some("database.primary.port"), json!(5432));
//!
//! assert!(keypath::has(&tree, Some("database.primary")));
//! assert_eq!(
//!     keypath::get(&tree, Some("database.primary.port"), None).unwrap(),
//!     &json!(5432)
//! );
//! assert_eq!(
//!     keypath::dot(&tree, ""),
//!     vec![("database.primary.port".to_string(), json!(5432))]
//! );
//! ```

mod access;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use access::{accessible, Accessible};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Key segment separator.
pub const SEPARATOR: char = '.';

/// Check whether `key` resolves inside `tree`.
///
/// Returns false for an empty tree or a `None` key. A key whose value is
/// `null` is present.
#[must_use]
pub fn has(tree: &Value, key: Option<&str>) -> bool {
    let Some(key) = key else {
        return false;
    };
    if is_empty(tree) {
        return false;
    }

    if accessible(tree).is_some_and(|container| container.exists(key)) {
        return true;
    }

    descend(tree, key).is_some()
}

/// Look up `key` inside `tree`.
///
/// A key stored verbatim (dots included) wins over dotted decomposition. A
/// `null` default counts as no default, so callers that need to tell a stored
/// `null` apart from a missing key should use [`has`].
///
/// # Errors
///
/// Returns [`Error::KeyNotFound`] when the key does not resolve and no
/// default was supplied.
pub fn get<'a>(tree: &'a Value, key: Option<&str>, default: Option<&'a Value>) -> Result<&'a Value> {
    let Some(key) = key else {
        return Ok(tree);
    };

    if let Some(value) = accessible(tree).and_then(|container| container.child(key)) {
        return Ok(value);
    }

    match descend(tree, key) {
        Some(value) => Ok(value),
        None => default
            .filter(|value| !value.is_null())
            .ok_or_else(|| Error::KeyNotFound {
                key: key.to_string(),
            }),
    }
}

/// Write `value` at `key`, creating intermediate objects as needed.
///
/// Intermediates that are missing or hold a scalar are replaced by an empty
/// object. A `None` key replaces the whole tree.
pub fn set(tree: &mut Value, key: Option<&str>, value: Value) {
    match key {
        Some(key) => *entry(tree, key) = value,
        None => *tree = value,
    }
}

/// Return the slot [`set`] would write for `key`, creating it if needed.
///
/// A newly created slot holds `null`.
pub fn entry<'a>(tree: &'a mut Value, key: &str) -> &'a mut Value {
    let mut segments = key.split(SEPARATOR).peekable();
    let mut current = tree;

    while let Some(segment) = segments.next() {
        current = slot(current, segment);
        if segments.peek().is_some() && !is_container(current) {
            *current = Value::Object(Map::new());
        }
    }

    current
}

/// Flatten `tree` into `(dotted key, leaf value)` pairs.
///
/// Nested objects are walked recursively; any other value, sequences
/// included, is a leaf. Empty objects produce no pairs. A sequence at the
/// root is flattened by index. Every key is prefixed with `prefix`.
#[must_use]
pub fn dot(tree: &Value, prefix: &str) -> Vec<(String, Value)> {
    let mut results = Vec::new();
    match tree {
        Value::Object(map) => flatten_into(&mut results, map, prefix),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_flattened(&mut results, item, format!("{prefix}{index}"));
            }
        }
        _ => {}
    }
    results
}

fn flatten_into(results: &mut Vec<(String, Value)>, map: &Map<String, Value>, prefix: &str) {
    for (key, value) in map {
        push_flattened(results, value, format!("{prefix}{key}"));
    }
}

fn push_flattened(results: &mut Vec<(String, Value)>, value: &Value, key: String) {
    match value {
        Value::Object(map) => flatten_into(results, map, &format!("{key}{SEPARATOR}")),
        leaf => results.push((key, leaf.clone())),
    }
}

/// Returns true for objects and sequences.
#[must_use]
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn descend<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    key.split(SEPARATOR)
        .try_fold(tree, |node, segment| accessible(node)?.child(segment))
}

/// Select the child of `node` at `segment`, inserting `null` if absent.
///
/// Scalars are turned into empty objects first. A sequence keeps its shape
/// when `segment` is an existing index or the next free one; any other
/// segment turns it into an object keyed by the stringified indices.
fn slot<'a>(node: &'a mut Value, segment: &str) -> &'a mut Value {
    let index = node
        .as_array()
        .and_then(|items| sequence_index(segment, items.len()));

    if let Some(index) = index {
        if let Value::Array(items) = node {
            if index == items.len() {
                items.push(Value::Null);
            }
        }
        return &mut node[index];
    }

    promote_to_object(node);
    &mut node[segment]
}

fn sequence_index(segment: &str, len: usize) -> Option<usize> {
    segment.parse::<usize>().ok().filter(|index| *index <= len)
}

fn promote_to_object(node: &mut Value) {
    let map = match std::mem::take(node) {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        _ => Map::new(),
    };
    *node = Value::Object(map);
}
