//! Core trait shared by every store kind
//!
//! Plain and ordered stores expose the same key-value surface through
//! [`KeyValueStore`], so test code can be written once against either.

use crate::error::{Error, Result};
use crate::value::Value;

/// Key-value surface of a store
///
/// `None` and `Value::Null` are the same thing here: reading a key that was
/// never written, was removed, or was set to null all yield `None`.
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
///
/// ## Purity Requirement
///
/// The transform passed to [`update`](KeyValueStore::update) or
/// [`try_update`](KeyValueStore::try_update) MAY BE CALLED MORE THAN ONCE
/// when another writer commits to the same key in between. It must be a pure
/// function of the prior value.
pub trait KeyValueStore: Send + Sync {
    /// Current value for `key`, or `None` if absent
    fn get(&self, key: &str) -> Option<Value>;

    /// Unconditionally overwrite the value for `key`
    ///
    /// Always returns `true`. Setting `Value::Null` removes the key.
    fn set(&self, key: &str, value: impl Into<Value>) -> bool;

    /// Delete `key`, returning what was stored immediately before
    fn remove(&self, key: &str) -> Option<Value>;

    /// Read-modify-write with a fallible transform
    ///
    /// The transform receives the prior value (`None` if absent). A non-null
    /// result is committed and returned. `None` or `Some(Value::Null)` leaves
    /// the store untouched and yields `Ok(None)`. A transform error is
    /// returned as-is and nothing is committed.
    fn try_update<F, E>(&self, key: &str, transform: F) -> std::result::Result<Option<Value>, E>
    where
        F: FnMut(Option<&Value>) -> std::result::Result<Option<Value>, E>,
        E: From<Error>;

    /// Read-modify-write with an infallible transform
    ///
    /// Returning `None` from the transform is the no-op idiom: the existing
    /// value is never cleared by it.
    fn update<F>(&self, key: &str, mut transform: F) -> Result<Option<Value>>
    where
        F: FnMut(Option<&Value>) -> Option<Value>,
    {
        self.try_update(key, |prior| Ok::<_, Error>(transform(prior)))
    }

    /// Whether `key` currently holds a value
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
