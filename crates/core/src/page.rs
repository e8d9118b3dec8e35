//! Query results: entries and pages
//!
//! A [`Page`] is materialized once, when the query runs. Later writes to the
//! store it came from are not reflected in it.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A single (key, value) pair returned from a store or query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Key the value is stored under
    pub key: String,
    /// Stored value
    pub value: Value,
}

impl Entry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Immutable snapshot of a query's result entries
///
/// The whole result set is held as a single page: `page_size` and `cursor`
/// are recorded as the caller passed them but never split the result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    entries: Vec<Entry>,
    page_size: Option<usize>,
    cursor: Option<String>,
}

impl Page {
    /// Create a page from already-ordered entries
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            page_size: None,
            cursor: None,
        }
    }

    /// Record the page size the caller asked for
    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Record the cursor the caller passed
    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    /// The materialized, ordered entries of this page
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Keys of the entries, in page order
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    /// Page size requested by the caller, if any
    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Cursor passed by the caller, if any
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Always true: every query result fits on one page
    pub fn is_finished(&self) -> bool {
        true
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the page has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the page, returning its entries
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl IntoIterator for Page {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Page {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_accessor_is_stable() {
        let page = Page::new(vec![Entry::new("a", 1i64), Entry::new("b", 2i64)]);
        assert_eq!(page.entries(), page.entries());
        assert_eq!(page.keys(), vec!["a", "b"]);
        assert_eq!(page.len(), 2);
        assert!(page.is_finished());
    }

    #[test]
    fn test_page_records_request_parameters() {
        let page = Page::new(vec![])
            .with_page_size(Some(50))
            .with_cursor(Some("abc".to_string()));
        assert!(page.is_empty());
        assert_eq!(page.page_size(), Some(50));
        assert_eq!(page.cursor(), Some("abc"));
    }

    #[test]
    fn test_page_iterates_in_order() {
        let page = Page::new(vec![Entry::new("x", 3i64), Entry::new("y", 1i64)]);
        let keys: Vec<String> = page.into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["x".to_string(), "y".to_string()]);
    }
}
