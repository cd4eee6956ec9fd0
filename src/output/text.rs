//! Plain text report.
//!
//! Per-root lines are written as soon as each root has been scanned; the
//! duplicate groups and the total follow once every root is done.
//!
//! ```text
//! FileDedupe v0.1.0
//!
//! Number of files found to check: 3
//! These files are the same:
//!     /photos/a.jpg
//!     /photos/copy/a.jpg
//!
//! Number of duplicates found: 2
//! ```

use std::io::{self, Write};
use std::path::Path;

use crate::duplicates::{DuplicateReport, RootReport};

/// Writes the human-readable report to any writer.
pub struct TextOutput<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> TextOutput<'a, W> {
    /// Wrap a writer (usually locked stdout).
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    /// Program name and version, followed by a blank line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.writer, "FileDedupe v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)
    }

    /// One line describing what was found under a root.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn root(&mut self, report: &RootReport) -> io::Result<()> {
        if report.is_empty() {
            self.empty_root(&report.root)
        } else {
            writeln!(
                self.writer,
                "Number of files found to check: {}",
                report.files_found
            )
        }
    }

    fn empty_root(&mut self, root: &Path) -> io::Result<()> {
        writeln!(self.writer, "Directory {} contains no files", root.display())
    }

    /// Every duplicate group, then the total.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn duplicates(&mut self, report: &DuplicateReport) -> io::Result<()> {
        for group in &report.groups {
            writeln!(self.writer, "These files are the same:")?;
            for path in &group.paths {
                writeln!(self.writer, "\t{}", path)?;
            }
            writeln!(self.writer)?;
        }
        self.total(report.duplicate_count)
    }

    /// The closing count line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn total(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.writer, "Number of duplicates found: {}", count)
    }
}
