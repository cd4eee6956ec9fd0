//! Fingerprint index: the accumulator shared by every root in a run.
//!
//! # Overview
//!
//! [`FingerprintIndex`] maps a content fingerprint to the ordered list of
//! paths that produced it. It only ever grows: entries are appended, never
//! replaced or removed. A path string is recorded at most once, so a file
//! reached through repeated or overlapping roots never pairs with itself. The orchestrating caller owns the index, lends it
//! mutably to each root scan, then lends it immutably to the extractor.
//!
//! # Example
//!
//! ```
//! use filededupe::duplicates::FingerprintIndex;
//!
//! let mut index = FingerprintIndex::new();
//! index.insert("a.txt", 42);
//! index.insert("b.txt", 42);
//! index.insert("c.txt", 7);
//!
//! assert_eq!(index.entries(42), ["a.txt", "b.txt"]);
//! assert!(index.entries(99).is_empty());
//! assert_eq!(index.len(), 2);
//! ```

use std::collections::{HashMap, HashSet};

use crate::scanner::Fingerprint;

/// Mapping from fingerprint to the paths sharing it, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    table: HashMap<Fingerprint, Vec<String>>,
    seen: HashSet<String>,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the list for `fingerprint`, creating the list if needed.
    ///
    /// Returns `false` and leaves the index unchanged if `path` is already
    /// recorded.
    pub fn insert(&mut self, path: impl Into<String>, fingerprint: Fingerprint) -> bool {
        let path = path.into();
        if self.seen.contains(&path) {
            log::debug!("Already indexed, skipping: {}", path);
            return false;
        }
        self.seen.insert(path.clone());
        self.table.entry(fingerprint).or_default().push(path);
        true
    }

    /// Whether `path` has been recorded under any fingerprint.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    /// All fingerprints observed so far, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = Fingerprint> + '_ {
        self.table.keys().copied()
    }

    /// Paths recorded for `fingerprint`; empty if it was never seen.
    #[must_use]
    pub fn entries(&self, fingerprint: Fingerprint) -> &[String] {
        self.table
            .get(&fingerprint)
            .map_or(&[] as &[String], Vec::as_slice)
    }

    /// Iterate over every `(fingerprint, paths)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (Fingerprint, &[String])> + '_ {
        self.table.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether nothing has been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Total number of paths stored across all fingerprints.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.seen.len()
    }
}
