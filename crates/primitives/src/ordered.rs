//! OrderedStore: key-value store with range-filtered, sorted enumeration
//!
//! Values participating in sorted queries must be numeric. Anything else can
//! still be stored and read back, but is skipped by [`OrderedStore::get_sorted`]
//! as if it were not there.

use crate::plain::PlainStore;
use crate::retry::RetryConfig;
use emustore_core::{
    Entry, Error, KeyValueStore, Number, Page, SortDirection, StoreIdentity, Value,
};
use std::cmp::Ordering;
use tracing::trace;

/// Store whose numeric entries can be enumerated in value order
///
/// # Example
///
/// ```ignore
/// let board = OrderedStore::new(StoreIdentity::global("leaderboard"));
/// board.set("alice", 30i64);
/// board.set("bob", 10i64);
/// let page = board.get_sorted(SortDirection::Descending, 10, None, None);
/// assert_eq!(page.keys(), vec!["alice", "bob"]);
/// ```
#[derive(Debug)]
pub struct OrderedStore {
    store: PlainStore,
}

impl OrderedStore {
    /// Create an empty ordered store with the default retry policy
    pub fn new(identity: StoreIdentity) -> Self {
        Self::with_retry(identity, RetryConfig::default())
    }

    /// Create an empty ordered store with an explicit retry policy
    pub fn with_retry(identity: StoreIdentity, retry: RetryConfig) -> Self {
        Self {
            store: PlainStore::with_retry(identity, retry),
        }
    }

    /// Identity this store was created for
    pub fn identity(&self) -> &StoreIdentity {
        self.store.identity()
    }

    /// Retry policy used by `update`
    pub fn retry_config(&self) -> &RetryConfig {
        self.store.retry_config()
    }

    /// Number of keys currently holding a value, numeric or not
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Snapshot of every entry, in key order
    pub fn entries(&self) -> Vec<Entry> {
        self.store.entries()
    }

    /// Numeric entries within `[min_value, max_value]`, sorted by value
    ///
    /// Either bound may be `None` (unbounded on that side); bounds are
    /// inclusive. Integers are compared exactly, never through `f64`. Ties
    /// keep key order. The whole result is returned as one page; `page_size`
    /// is only recorded on it.
    pub fn get_sorted(
        &self,
        direction: impl Into<SortDirection>,
        page_size: usize,
        min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> Page {
        let direction = direction.into();

        let mut ranked: Vec<(Number, Entry)> = self
            .store
            .entries()
            .into_iter()
            .filter_map(|entry| {
                let n = entry.value.as_number()?;
                let in_range = min_value.map_or(true, |min| n.cmp_f64(min) != Ordering::Less)
                    && max_value.map_or(true, |max| n.cmp_f64(max) != Ordering::Greater);
                in_range.then_some((n, entry))
            })
            .collect();

        // Stable: equal values stay in key order for both directions
        ranked.sort_by(|(a, _), (b, _)| {
            let ord = a.cmp(b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        trace!(
            target: "emustore::store",
            store = %self.identity(),
            %direction,
            matched = ranked.len(),
            "get_sorted"
        );

        Page::new(ranked.into_iter().map(|(_, entry)| entry).collect())
            .with_page_size(Some(page_size))
    }
}

impl KeyValueStore for OrderedStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key)
    }

    fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        self.store.set(key, value)
    }

    fn remove(&self, key: &str) -> Option<Value> {
        self.store.remove(key)
    }

    fn try_update<F, E>(&self, key: &str, transform: F) -> Result<Option<Value>, E>
    where
        F: FnMut(Option<&Value>) -> Result<Option<Value>, E>,
        E: From<Error>,
    {
        self.store.try_update(key, transform)
    }
}
