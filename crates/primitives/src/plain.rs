//! PlainStore: namespaced in-memory key-value store
//!
//! ## Design
//!
//! A single `RwLock` guards the key map. Every write stamps the slot with a
//! store-wide monotonically increasing version, which is what `update`
//! compares against when it commits.
//!
//! ## Update Protocol
//!
//! 1. Snapshot `(value, version)` of the key under the read lock
//! 2. Run the caller's transform with no lock held
//! 3. Take the write lock; commit only if the key's version is unchanged
//! 4. Otherwise back off and start over (see [`RetryConfig`])
//!
//! The committed value is therefore always derived from the value that was
//! current at commit time, and no Set/Remove/Update on the same key can slip
//! in between the read and the write of a successful attempt.

use crate::retry::RetryConfig;
use emustore_core::{Entry, Error, KeyValueStore, StoreIdentity, Value};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone)]
struct Slot {
    value: Value,
    version: u64,
}

#[derive(Debug, Default)]
struct Slots {
    map: BTreeMap<String, Slot>,
    version: u64,
}

impl Slots {
    fn put(&mut self, key: &str, value: Value) -> Option<Value> {
        self.version += 1;
        let slot = Slot {
            value,
            version: self.version,
        };
        self.map.insert(key.to_string(), slot).map(|s| s.value)
    }

    fn delete(&mut self, key: &str) -> Option<Value> {
        let removed = self.map.remove(key).map(|s| s.value);
        if removed.is_some() {
            self.version += 1;
        }
        removed
    }

    fn version_of(&self, key: &str) -> Option<u64> {
        self.map.get(key).map(|s| s.version)
    }
}

/// Namespaced mapping from string keys to values
///
/// # Example
///
/// ```ignore
/// use emustore_core::{KeyValueStore, StoreIdentity, Value};
/// use emustore_primitives::PlainStore;
///
/// let store = PlainStore::new(StoreIdentity::global("inventory"));
/// store.set("sword", 1i64);
/// store.update("sword", |prior| {
///     prior.and_then(Value::as_int).map(|n| Value::Int(n + 1))
/// })?;
/// assert_eq!(store.get("sword"), Some(Value::Int(2)));
/// ```
#[derive(Debug)]
pub struct PlainStore {
    identity: StoreIdentity,
    slots: RwLock<Slots>,
    retry: RetryConfig,
}

impl PlainStore {
    /// Create an empty store with the default retry policy
    pub fn new(identity: StoreIdentity) -> Self {
        Self::with_retry(identity, RetryConfig::default())
    }

    /// Create an empty store with an explicit retry policy
    pub fn with_retry(identity: StoreIdentity, retry: RetryConfig) -> Self {
        Self {
            identity,
            slots: RwLock::new(Slots::default()),
            retry,
        }
    }

    /// Identity this store was created for
    pub fn identity(&self) -> &StoreIdentity {
        &self.identity
    }

    /// Retry policy used by `update`
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Number of keys currently holding a value
    pub fn len(&self) -> usize {
        self.slots.read().map.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.slots.read().map.is_empty()
    }

    /// All keys, in key order
    pub fn keys(&self) -> Vec<String> {
        self.slots.read().map.keys().cloned().collect()
    }

    /// Snapshot of every entry, in key order
    pub fn entries(&self) -> Vec<Entry> {
        self.slots
            .read()
            .map
            .iter()
            .map(|(k, slot)| Entry::new(k.clone(), slot.value.clone()))
            .collect()
    }
}

impl KeyValueStore for PlainStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.slots.read().map.get(key).map(|s| s.value.clone())
    }

    fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let mut slots = self.slots.write();
        if value.is_null() {
            slots.delete(key);
        } else {
            slots.put(key, value);
        }
        trace!(target: "emustore::store", store = %self.identity, key, "set");
        true
    }

    fn remove(&self, key: &str) -> Option<Value> {
        let previous = self.slots.write().delete(key);
        trace!(
            target: "emustore::store",
            store = %self.identity,
            key,
            existed = previous.is_some(),
            "remove"
        );
        previous
    }

    fn try_update<F, E>(&self, key: &str, mut transform: F) -> Result<Option<Value>, E>
    where
        F: FnMut(Option<&Value>) -> Result<Option<Value>, E>,
        E: From<Error>,
    {
        let mut attempt = 0;
        loop {
            let (prior, seen_version) = {
                let slots = self.slots.read();
                match slots.map.get(key) {
                    Some(slot) => (Some(slot.value.clone()), Some(slot.version)),
                    None => (None, None),
                }
            };

            let next = match transform(prior.as_ref())? {
                Some(value) if !value.is_null() => value,
                // No-op update: nothing to commit
                _ => return Ok(None),
            };

            {
                let mut slots = self.slots.write();
                if slots.version_of(key) == seen_version {
                    slots.put(key, next.clone());
                    trace!(target: "emustore::store", store = %self.identity, key, attempt, "update committed");
                    return Ok(Some(next));
                }
            }

            if attempt >= self.retry.max_retries {
                warn!(
                    target: "emustore::store",
                    store = %self.identity,
                    key,
                    attempts = attempt + 1,
                    "Update retries exhausted"
                );
                return Err(Error::UpdateConflict {
                    key: key.to_string(),
                    attempts: attempt + 1,
                }
                .into());
            }

            debug!(target: "emustore::store", store = %self.identity, key, attempt, "Update lost CAS race, retrying");
            self.retry.backoff(attempt);
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn store() -> PlainStore {
        PlainStore::new(StoreIdentity::global("test"))
    }

    // ========== Get / Set / Remove ==========

    #[test]
    fn test_get_missing_key_is_none() {
        let store = store();
        assert_eq!(store.get("never"), None);
        assert!(!store.contains("never"));
    }

    #[test]
    fn test_set_then_get() {
        let store = store();
        assert!(store.set("k", "v"));
        assert_eq!(store.get("k"), Some(Value::from("v")));
    }

    #[test]
    fn test_set_overwrites() {
        let store = store();
        store.set("k", 1i64);
        store.set("k", 2i64);
        assert_eq!(store.get("k"), Some(Value::Int(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_null_removes() {
        let store = store();
        store.set("k", 1i64);
        assert!(store.set("k", Value::Null));
        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_table_value() {
        let store = store();
        let mut map = HashMap::new();
        map.insert("gold".to_string(), Value::Int(5));
        store.set("profile", Value::Object(map.clone()));
        assert_eq!(store.get("profile"), Some(Value::Object(map)));
    }

    #[test]
    fn test_remove_returns_previous() {
        let store = store();
        store.set("k", 7i64);
        assert_eq!(store.remove("k"), Some(Value::Int(7)));
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let store = store();
        store.set("other", 1i64);
        assert_eq!(store.remove("missing"), None);
        assert_eq!(store.len(), 1);
    }

    // ========== Update ==========

    #[test]
    fn test_update_creates_missing_key() {
        let store = store();
        let result = store
            .update("count", |prior| {
                assert!(prior.is_none());
                Some(Value::Int(1))
            })
            .unwrap();
        assert_eq!(result, Some(Value::Int(1)));
        assert_eq!(store.get("count"), Some(Value::Int(1)));
    }

    #[test]
    fn test_update_sees_prior_value() {
        let store = store();
        store.set("count", 41i64);
        let result = store
            .update("count", |prior| {
                prior.and_then(Value::as_int).map(|n| Value::Int(n + 1))
            })
            .unwrap();
        assert_eq!(result, Some(Value::Int(42)));
        assert_eq!(store.get("count"), Some(Value::Int(42)));
    }

    #[test]
    fn test_update_returning_none_preserves_value() {
        let store = store();
        store.set("k", "keep");
        let result = store.update("k", |_| None).unwrap();
        assert_eq!(result, None);
        assert_eq!(store.get("k"), Some(Value::from("keep")));
    }

    #[test]
    fn test_update_returning_null_preserves_value() {
        let store = store();
        store.set("k", "keep");
        let result = store.update("k", |_| Some(Value::Null)).unwrap();
        assert_eq!(result, None);
        assert_eq!(store.get("k"), Some(Value::from("keep")));
    }

    #[test]
    fn test_update_returning_none_on_missing_key_leaves_it_missing() {
        let store = store();
        assert_eq!(store.update("k", |_| None).unwrap(), None);
        assert!(!store.contains("k"));
    }

    #[test]
    fn test_try_update_propagates_caller_error() {
        #[derive(Debug, PartialEq)]
        enum AppError {
            Rejected,
            Store(Error),
        }
        impl From<Error> for AppError {
            fn from(e: Error) -> Self {
                AppError::Store(e)
            }
        }

        let store = store();
        store.set("k", 1i64);
        let result = store.try_update("k", |_| Err(AppError::Rejected));
        assert_eq!(result, Err(AppError::Rejected));
        assert_eq!(store.get("k"), Some(Value::Int(1)));
    }

    #[test]
    fn test_update_retries_when_key_changes_underneath() {
        let store = store();
        store.set("k", 1i64);
        let mut calls = 0;
        let result = store
            .update("k", |prior| {
                calls += 1;
                if calls == 1 {
                    // Simulate a concurrent writer committing between read and write
                    store.slots.write().put("k", Value::Int(10));
                }
                prior.and_then(Value::as_int).map(|n| Value::Int(n + 1))
            })
            .unwrap();
        assert_eq!(calls, 2);
        assert_eq!(result, Some(Value::Int(11)));
        assert_eq!(store.get("k"), Some(Value::Int(11)));
    }

    #[test]
    fn test_update_conflict_when_retries_exhausted() {
        let store = PlainStore::with_retry(StoreIdentity::global("test"), RetryConfig::no_retry());
        store.set("k", 1i64);
        let result = store.update("k", |prior| {
            store.slots.write().put("k", Value::Int(99));
            prior.cloned()
        });
        assert_eq!(
            result,
            Err(Error::UpdateConflict {
                key: "k".to_string(),
                attempts: 1,
            })
        );
        assert_eq!(store.get("k"), Some(Value::Int(99)));
    }

    // ========== Inspection ==========

    #[test]
    fn test_keys_and_entries_are_key_ordered() {
        let store = store();
        store.set("b", 2i64);
        store.set("a", 1i64);
        store.set("c", 3i64);
        assert_eq!(store.keys(), vec!["a", "b", "c"]);
        let entries = store.entries();
        assert_eq!(entries[0], Entry::new("a", 1i64));
        assert_eq!(entries[2], Entry::new("c", 3i64));
    }

    #[test]
    fn test_identity_is_kept() {
        let store = PlainStore::new(StoreIdentity::new("inv", "eu"));
        assert_eq!(store.identity().to_string(), "inv:eu");
    }
}
