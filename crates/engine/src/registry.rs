//! Store registry
//!
//! Resolves a (name, scope) identity to a cached store instance, creating it
//! on first use. Plain and ordered stores live in two disjoint namespaces:
//! asking for both kinds with the same identity yields two different stores.
//!
//! Each namespace is a `HashMap` keyed by `name:scope` behind its own
//! `parking_lot::Mutex`. The lock is held across lookup and insert so two
//! callers racing on first use always receive the same `Arc`.

use crate::config::RegistryConfig;
use emustore_core::{Entry, Page, Result, StoreIdentity};
use emustore_primitives::{OrderedStore, PlainStore};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

type StoreMap<S> = Mutex<HashMap<String, Arc<S>>>;

/// Top-level emulator service
///
/// A registry is an ordinary value: construct one per test (or per process)
/// and pass it to whatever needs stores. Stores it creates live as long as
/// the registry; there is no store deletion.
///
/// # Example
///
/// ```ignore
/// use emustore_core::{KeyValueStore, Value};
/// use emustore_engine::Registry;
///
/// let registry = Registry::new();
/// let inventory = registry.get_store("inventory", None);
/// inventory.set("sword", 1i64);
///
/// let same = registry.get_store("inventory", Some("global"));
/// assert_eq!(same.get("sword"), Some(Value::Int(1)));
/// ```
#[derive(Debug)]
pub struct Registry {
    config: RegistryConfig,
    plain: StoreMap<PlainStore>,
    ordered: StoreMap<OrderedStore>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self::build(RegistryConfig::default())
    }

    /// Create a registry with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration fails
    /// [`RegistryConfig::validate`].
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RegistryConfig) -> Self {
        info!(
            target: "emustore::registry",
            default_scope = %config.default_scope,
            max_retries = config.update_retry.max_retries,
            "Registry created"
        );
        Self {
            config,
            plain: Mutex::new(HashMap::new()),
            ordered: Mutex::new(HashMap::new()),
        }
    }

    /// Configuration this registry was built with
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn identity(&self, name: &str, scope: Option<&str>) -> StoreIdentity {
        StoreIdentity::with_default_scope(name, scope, &self.config.default_scope)
    }

    /// Plain store for `(name, scope)`, created on first request
    ///
    /// `scope` defaults to the configured default scope (`"global"`).
    pub fn get_store(&self, name: &str, scope: Option<&str>) -> Arc<PlainStore> {
        let identity = self.identity(name, scope);
        resolve(&self.plain, identity, "plain", |id| {
            PlainStore::with_retry(id, self.config.update_retry.clone())
        })
    }

    /// Ordered store for `(name, scope)`, created on first request
    ///
    /// Independent of any plain store with the same identity.
    pub fn get_ordered_store(&self, name: &str, scope: Option<&str>) -> Arc<OrderedStore> {
        let identity = self.identity(name, scope);
        resolve(&self.ordered, identity, "ordered", |id| {
            OrderedStore::with_retry(id, self.config.update_retry.clone())
        })
    }

    /// Names of known stores (plain or ordered) starting with `prefix`
    ///
    /// Matching is a literal leading-substring test. Each name appears once,
    /// in name order, with placeholder value `0`: this reports existence, not
    /// content. `page_size` and `cursor` are recorded on the page but the full
    /// result is always returned.
    pub fn list_stores(
        &self,
        prefix: Option<&str>,
        page_size: Option<usize>,
        cursor: Option<&str>,
    ) -> Page {
        let prefix = prefix.unwrap_or("");
        let mut names = BTreeSet::new();
        names.extend(
            self.plain
                .lock()
                .values()
                .map(|s| s.identity().name.clone()),
        );
        names.extend(
            self.ordered
                .lock()
                .values()
                .map(|s| s.identity().name.clone()),
        );

        let entries = names
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Entry::new(name, 0i64))
            .collect();

        Page::new(entries)
            .with_page_size(page_size)
            .with_cursor(cursor.map(str::to_string))
    }

    /// Number of store instances created so far, across both namespaces
    pub fn store_count(&self) -> usize {
        self.plain.lock().len() + self.ordered.lock().len()
    }
}

fn resolve<S>(
    map: &StoreMap<S>,
    identity: StoreIdentity,
    kind: &'static str,
    create: impl FnOnce(StoreIdentity) -> S,
) -> Arc<S> {
    // Held across lookup and insert so only one instance is ever created
    let mut stores = map.lock();
    let key = identity.cache_key();
    if let Some(store) = stores.get(&key) {
        return Arc::clone(store);
    }

    debug!(
        target: "emustore::registry",
        name = %identity.name,
        scope = %identity.scope,
        kind,
        "Creating store"
    );
    let store = Arc::new(create(identity));
    stores.insert(key, Arc::clone(&store));
    store
}
