//! emustore - In-process emulator of a namespaced key-value storage API
//!
//! Reproduces the observable contract of a remote key-value service (plain
//! stores, order-indexed stores, and store enumeration) entirely in memory,
//! so code can be tested without a network dependency.
//!
//! # Quick Start
//!
//! ```ignore
//! use emustore::{KeyValueStore, Registry, SortDirection, Value};
//!
//! let registry = Registry::new();
//!
//! let coins = registry.get_store("coins", None);
//! coins.set("player_1", 10i64);
//! coins.update("player_1", |prior| {
//!     prior.and_then(Value::as_int).map(|n| Value::Int(n + 5))
//! })?;
//!
//! let board = registry.get_ordered_store("leaderboard", None);
//! board.set("alice", 30i64);
//! board.set("bob", 10i64);
//! let top = board.get_sorted(SortDirection::Descending, 10, None, None);
//! ```
//!
//! # Architecture
//!
//! - `emustore-core`: value model, pages, errors, the [`KeyValueStore`] trait
//! - `emustore-primitives`: [`PlainStore`] and [`OrderedStore`]
//! - `emustore-engine`: [`Registry`] and [`RegistryConfig`]

pub use emustore_core::{
    Entry, Error, KeyValueStore, Number, Page, Result, SortDirection, StoreIdentity, Value,
    DEFAULT_SCOPE,
};
pub use emustore_engine::{Registry, RegistryConfig, CONFIG_FILE_NAME};
pub use emustore_primitives::{OrderedStore, PlainStore, RetryConfig};
