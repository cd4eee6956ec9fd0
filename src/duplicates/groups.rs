//! Duplicate groups and their extraction from a completed index.
//!
//! # Overview
//!
//! Once every root has been scanned, [`extract`] walks the
//! [`FingerprintIndex`] once and returns each fingerprint shared by two or
//! more paths, together with the total number of files taking part in some
//! group. A group of three identical files contributes three to that total.
//!
//! [`verify_groups`] is an optional second step that re-checks each group
//! byte for byte, splitting out fingerprint collisions.
//!
//! # Example
//!
//! ```
//! use filededupe::duplicates::{extract, FingerprintIndex};
//!
//! let mut index = FingerprintIndex::new();
//! index.insert("/a", 1);
//! index.insert("/b", 1);
//! index.insert("/c", 1);
//! index.insert("/d", 2);
//!
//! let (groups, total) = extract(&index);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(total, 3);
//! ```

use serde::Serialize;
use std::path::Path;

use super::FingerprintIndex;
use crate::scanner::fingerprint::compare_files;
use crate::scanner::{fingerprint_to_hex, Fingerprint, HashError};

/// Files sharing one fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Shared fingerprint
    pub fingerprint: Fingerprint,
    /// Paths in index insertion order
    pub paths: Vec<String>,
}

impl DuplicateGroup {
    /// Create a new group.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, paths: Vec<String>) -> Self {
        Self { fingerprint, paths }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Fingerprint as 8 hex digits.
    #[must_use]
    pub fn fingerprint_hex(&self) -> String {
        fingerprint_to_hex(self.fingerprint)
    }
}

/// Collect every fingerprint with two or more paths.
///
/// Returns the groups (in the index's arbitrary key order) and the sum of
/// their full sizes.
#[must_use]
pub fn extract(index: &FingerprintIndex) -> (Vec<DuplicateGroup>, usize) {
    let mut total = 0;
    let mut groups = Vec::new();

    for (fingerprint, paths) in index.iter() {
        if paths.len() > 1 {
            total += paths.len();
            groups.push(DuplicateGroup::new(fingerprint, paths.to_vec()));
        }
    }

    log::debug!(
        "Extracted {} duplicate group(s) covering {} file(s) from {} fingerprint(s)",
        groups.len(),
        total,
        index.len()
    );

    (groups, total)
}

/// Outcome of byte-for-byte verification.
#[derive(Debug, Default)]
pub struct VerifyOutcome {
    /// Groups whose members are confirmed identical
    pub groups: Vec<DuplicateGroup>,
    /// Sum of the full sizes of the confirmed groups
    pub total: usize,
    /// Groups that were split because of a fingerprint collision
    pub collisions: usize,
    /// Files that could not be re-read; they are left out of all groups
    pub errors: Vec<HashError>,
}

/// Split each group into subsets of byte-for-byte identical files.
///
/// Within a group, each file is compared against the first member of every
/// subset found so far; files that match none start a new subset. A file
/// that cannot be read is dropped, whether it is the candidate or a
/// subset's first member. Subsets of one file are dropped. Group order and
/// path order are preserved.
#[must_use]
pub fn verify_groups(groups: Vec<DuplicateGroup>) -> VerifyOutcome {
    let mut outcome = VerifyOutcome::default();

    for group in groups {
        let fingerprint = group.fingerprint;
        let mut subsets: Vec<Vec<String>> = Vec::new();

        'paths: for path in group.paths {
            let mut i = 0;
            while i < subsets.len() {
                match compare_files(Path::new(&subsets[i][0]), Path::new(&path)) {
                    Ok(true) => {
                        subsets[i].push(path);
                        continue 'paths;
                    }
                    Ok(false) => i += 1,
                    Err(e) if e.path() == Path::new(&subsets[i][0]) => {
                        // The next member takes over and is compared again
                        log::warn!("Verification dropped {}: {}", subsets[i][0], e);
                        outcome.errors.push(e);
                        subsets[i].remove(0);
                        if subsets[i].is_empty() {
                            subsets.remove(i);
                        }
                    }
                    Err(e) => {
                        log::warn!("Verification dropped {}: {}", path, e);
                        outcome.errors.push(e);
                        continue 'paths;
                    }
                }
            }
            subsets.push(vec![path]);
        }

        if subsets.len() > 1 {
            log::info!(
                "Fingerprint {} is shared by {} distinct contents",
                fingerprint_to_hex(fingerprint),
                subsets.len()
            );
            outcome.collisions += 1;
        }

        for subset in subsets.into_iter().filter(|s| s.len() > 1) {
            outcome.total += subset.len();
            outcome.groups.push(DuplicateGroup::new(fingerprint, subset));
        }
    }

    outcome
}
