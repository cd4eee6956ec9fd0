//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "roots": [
//!     {
//!       "path": "/photos",
//!       "files_found": 3,
//!       "fingerprinted": 3,
//!       "skipped": 0,
//!       "errors": []
//!     }
//!   ],
//!   "invalid_roots": [],
//!   "duplicates": [
//!     {
//!       "fingerprint": "cbf43926",
//!       "files": ["/photos/a.jpg", "/photos/copy/a.jpg"]
//!     }
//!   ],
//!   "duplicate_count": 2,
//!   "verified": false,
//!   "collisions": 0
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, DuplicateReport, FinderError, RootReport};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// CRC-32 fingerprint as 8 hexadecimal digits
    pub fingerprint: String,
    /// Paths in discovery order
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            fingerprint: group.fingerprint_hex(),
            files: group.paths.clone(),
        }
    }
}

/// Per-root statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRoot {
    /// Root as given on the command line
    pub path: String,
    /// Regular files discovered
    pub files_found: usize,
    /// Files fingerprinted and indexed
    pub fingerprinted: usize,
    /// Files an earlier root had already indexed
    pub already_indexed: usize,
    /// Files that could not be read
    pub skipped: usize,
    /// Messages for unreadable files and subtrees
    pub errors: Vec<String>,
}

impl From<&RootReport> for JsonRoot {
    fn from(report: &RootReport) -> Self {
        let errors = report
            .scan_errors
            .iter()
            .map(ToString::to_string)
            .chain(report.skipped.iter().map(ToString::to_string))
            .collect();

        Self {
            path: report.root.to_string_lossy().into_owned(),
            files_found: report.files_found,
            fingerprinted: report.fingerprinted,
            already_indexed: report.already_indexed,
            skipped: report.skipped.len(),
            errors,
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Scanned roots, in argument order
    pub roots: Vec<JsonRoot>,
    /// Directory arguments that were skipped as invalid
    pub invalid_roots: Vec<String>,
    /// Duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Sum of all group sizes
    pub duplicate_count: usize,
    /// Whether groups were verified byte for byte
    pub verified: bool,
    /// Groups split apart by verification
    pub collisions: usize,
}

impl JsonOutput {
    /// Assemble the document for a finished run.
    ///
    /// # Example
    ///
    /// ```
    /// use filededupe::duplicates::DuplicateReport;
    /// use filededupe::output::json::JsonOutput;
    ///
    /// let output = JsonOutput::new(&[], &[], &DuplicateReport::default());
    /// assert_eq!(output.duplicate_count, 0);
    /// assert!(output.duplicates.is_empty());
    /// ```
    #[must_use]
    pub fn new(roots: &[RootReport], invalid: &[FinderError], report: &DuplicateReport) -> Self {
        Self {
            roots: roots.iter().map(JsonRoot::from).collect(),
            invalid_roots: invalid.iter().map(ToString::to_string).collect(),
            duplicates: report.groups.iter().map(JsonDuplicateGroup::from).collect(),
            duplicate_count: report.duplicate_count,
            verified: report.verified,
            collisions: report.collisions,
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
