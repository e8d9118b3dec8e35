//! Core types and traits for emustore
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Tagged value union stored under keys
//! - Number: Exactly ordered numeric view of a Value
//! - Entry / Page: Query results
//! - StoreIdentity: (name, scope) pair identifying a store
//! - SortDirection: Ordering for sorted enumeration
//! - Error: Error type hierarchy
//! - KeyValueStore: Key-value surface shared by all store kinds

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod page;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use page::{Entry, Page};
pub use traits::KeyValueStore;
pub use types::{SortDirection, StoreIdentity, DEFAULT_SCOPE};
pub use value::{Number, Value};
