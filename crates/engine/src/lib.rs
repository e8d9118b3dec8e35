//! Engine layer for emustore
//!
//! - **Registry**: Lazily creates and caches plain and ordered stores by
//!   (name, scope), and enumerates known store names by prefix
//! - **RegistryConfig**: Defaults for new stores, loadable from `emustore.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod registry;

pub use config::{RegistryConfig, CONFIG_FILE_NAME};
pub use registry::Registry;
