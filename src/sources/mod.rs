//! Source records and the ordered source mapping
//!
//! These are the core data structures flowing through the pipeline: one
//! record per attempted page fetch, folded into an insertion-ordered mapping
//! of the pages that actually produced text.

use std::collections::HashMap;

/// Outcome of fetching a single page
#[derive(Debug, Clone)]
pub struct SourceRecord {
    /// The URL that was fetched
    pub url: String,
    /// Extracted page text, `None` on any failure or timeout
    pub text: Option<String>,
}

impl SourceRecord {
    /// A successful fetch with extracted text
    pub fn ok(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: Some(text.into()),
        }
    }

    /// A failed fetch (network error, bad status, parse overrun, timeout)
    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: None,
        }
    }
}

/// Insertion-ordered mapping from URL to non-empty extracted text
///
/// Insertion order follows fetch *completion* order, not input order; the
/// position of an entry later becomes its citation number. Keys are unique:
/// inserting a URL that is already present replaces its text in place and
/// keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct SourceMapping {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl SourceMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the text for a URL
    pub fn insert(&mut self, url: String, text: String) {
        if let Some(&pos) = self.index.get(&url) {
            self.entries[pos].1 = text;
        } else {
            self.index.insert(url.clone(), self.entries.len());
            self.entries.push((url, text));
        }
    }

    /// Get the text for a URL, if present
    pub fn get(&self, url: &str) -> Option<&str> {
        self.index.get(url).map(|&pos| self.entries[pos].1.as_str())
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(u, t)| (u.as_str(), t.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
