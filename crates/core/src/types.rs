//! Core types for emustore
//!
//! This module defines the foundational types:
//! - StoreIdentity: (name, scope) pair identifying a store
//! - SortDirection: Ordering of sorted enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope used when a caller does not name one
pub const DEFAULT_SCOPE: &str = "global";

/// Identity of a store: name plus scope
///
/// Two identical identities always resolve to the same store instance for
/// the lifetime of a registry. The scope is a secondary namespace qualifier
/// that distinguishes otherwise identically named stores.
///
/// Format: "name:scope"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoreIdentity {
    /// Store name
    pub name: String,
    /// Scope qualifier
    pub scope: String,
}

impl StoreIdentity {
    /// Create an identity with an explicit scope
    pub fn new(name: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: scope.into(),
        }
    }

    /// Create an identity in the `"global"` scope
    pub fn global(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_SCOPE)
    }

    /// Create an identity, falling back to `default_scope` when `scope` is `None`
    pub fn with_default_scope(name: &str, scope: Option<&str>, default_scope: &str) -> Self {
        Self::new(name, scope.unwrap_or(default_scope))
    }

    /// Cache key used by the registry: `name:scope`
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.name, self.scope)
    }
}

impl fmt::Display for StoreIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.scope)
    }
}

/// Direction of a sorted enumeration
///
/// Accepted either as the token itself, as the literal string, or as an
/// "is ascending" flag. Anything that does not denote ascending order is
/// treated as descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest value first
    #[default]
    Ascending,
    /// Largest value first
    Descending,
}

impl SortDirection {
    /// Whether this is ascending order
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Ascending)
    }

    /// Literal name of this direction
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }
}

impl From<bool> for SortDirection {
    fn from(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}

impl From<&str> for SortDirection {
    fn from(s: &str) -> Self {
        let s = s.trim();
        let ascending = s.eq_ignore_ascii_case("ascending") || s.eq_ignore_ascii_case("asc");
        SortDirection::from(ascending)
    }
}

impl From<String> for SortDirection {
    fn from(s: String) -> Self {
        SortDirection::from(s.as_str())
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
