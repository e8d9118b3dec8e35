//! Primitives layer for emustore
//!
//! Provides the two store kinds:
//! - **PlainStore**: Namespaced key-value mapping with get/set/remove/update
//! - **OrderedStore**: PlainStore whose numeric values can be enumerated
//!   in value order with optional inclusive bounds
//!
//! Both implement [`emustore_core::KeyValueStore`]. Stores hold all of their
//! state in memory; nothing is persisted.
//!
//! ## Update Atomicity
//!
//! `update` is optimistic: the transform runs outside the store lock and the
//! result is committed with a compare-and-swap, retried per [`RetryConfig`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ordered;
pub mod plain;
pub mod retry;

pub use ordered::OrderedStore;
pub use plain::PlainStore;
pub use retry::RetryConfig;
