//! Container adapters for key-segment lookups.
//!
//! A configuration tree mixes two kinds of containers: objects, addressed by
//! string keys, and sequences, addressed by integer indices. [`Accessible`]
//! hides the difference so traversal code can treat every key segment the
//! same way.

use serde_json::{Map, Value};

/// A container that can be indexed by a single key segment.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::keypath::{accessible, Accessible};
///
/// let list = json!(["a", "b"]);
/// let container = accessible(&list).unwrap();
/// assert!(container.exists("1"));
/// assert!(!container.exists("2"));
/// assert_eq!(container.child("0"), Some(&json!("a")));
/// ```
pub trait Accessible {
    /// Returns true if `segment` addresses an entry of this container.
    ///
    /// Entries holding `null` exist.
    fn exists(&self, segment: &str) -> bool {
        self.child(segment).is_some()
    }

    /// Returns the entry addressed by `segment`.
    fn child(&self, segment: &str) -> Option<&Value>;
}

impl Accessible for Map<String, Value> {
    fn exists(&self, segment: &str) -> bool {
        self.contains_key(segment)
    }

    fn child(&self, segment: &str) -> Option<&Value> {
        self.get(segment)
    }
}

impl Accessible for Vec<Value> {
    fn child(&self, segment: &str) -> Option<&Value> {
        segment.parse::<usize>().ok().and_then(|index| self.get(index))
    }
}

/// Returns the container adapter for `value`, or `None` for scalars.
#[must_use]
pub fn accessible(value: &Value) -> Option<&dyn Accessible> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => Some(items),
        _ => None,
    }
}
