//! Duplicate finder: scans roots into a shared index and reports groups.
//!
//! # Overview
//!
//! The pipeline for each root is:
//! 1. **Validate** - the root must be an existing directory
//! 2. **Walk** - collect candidate file paths (see [`crate::scanner::Walker`])
//! 3. **Fingerprint** - CRC-32 every file on a bounded rayon pool
//! 4. **Index** - insert each `(path, fingerprint)` pair, in discovery order
//!
//! After all roots, [`DuplicateFinder::finish`] extracts the groups and,
//! when enabled, verifies them byte for byte.
//!
//! Fingerprints are computed in parallel, but the results are collected in
//! discovery order and inserted by the calling thread, so the index never
//! sees concurrent writers.
//!
//! # Example
//!
//! ```no_run
//! use filededupe::duplicates::{DuplicateFinder, FingerprintIndex};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let mut index = FingerprintIndex::new();
//!
//! let report = finder.scan_root(Path::new("."), &mut index).unwrap();
//! println!("Number of files found to check: {}", report.files_found);
//!
//! let result = finder.finish(&index);
//! println!("Number of duplicates found: {}", result.duplicate_count);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use super::groups::{extract, verify_groups, DuplicateGroup};
use super::FingerprintIndex;
use crate::progress::ProgressCallback;
use crate::scanner::{Fingerprint, Fingerprinter, HashError, ScanError, Walker, WalkerConfig};

/// What to do with the remaining roots when one root is invalid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootErrorPolicy {
    /// Stop the run at the first invalid root.
    #[default]
    Abort,
    /// Record the failure and continue with the next root.
    Skip,
}

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for parallel fingerprinting.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Re-check every group byte for byte after extraction.
    pub verify: bool,
    /// Policy applied by [`DuplicateFinder::find_duplicates_in_paths`].
    pub root_error_policy: RootErrorPolicy,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("walker_config", &self.walker_config)
            .field("verify", &self.verify)
            .field("root_error_policy", &self.root_error_policy)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            walker_config: WalkerConfig::default(),
            verify: false,
            root_error_policy: RootErrorPolicy::Abort,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Create a new configuration with custom I/O thread count.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Only scan the top level of each root.
    #[must_use]
    pub fn with_exclude_subdirs(mut self, exclude: bool) -> Self {
        self.walker_config.exclude_subdirs = exclude;
        self
    }

    /// Enable byte-for-byte verification of reported groups.
    #[must_use]
    pub fn with_verify(mut self, enabled: bool) -> Self {
        self.verify = enabled;
        self
    }

    /// Set the invalid-root policy.
    #[must_use]
    pub fn with_root_error_policy(mut self, policy: RootErrorPolicy) -> Self {
        self.root_error_policy = policy;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Errors that make a root unusable.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// An empty string was given as a root.
    #[error("Directory to process is empty")]
    EmptyPath,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Result of scanning one root into the index.
#[derive(Debug, Default)]
pub struct RootReport {
    /// Root as given by the caller
    pub root: PathBuf,
    /// Regular files discovered under the root
    pub files_found: usize,
    /// Files successfully fingerprinted and inserted
    pub fingerprinted: usize,
    /// Files already indexed through an earlier or overlapping root
    pub already_indexed: usize,
    /// Files that could not be read; none of them entered the index
    pub skipped: Vec<HashError>,
    /// Entries the walker could not enumerate
    pub scan_errors: Vec<ScanError>,
}

impl RootReport {
    /// True when the root held no files at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files_found == 0
    }
}

/// What happened to one root during [`DuplicateFinder::scan_paths`].
#[derive(Debug)]
pub enum RootEvent<'a> {
    /// The root was scanned into the index.
    Scanned(&'a RootReport),
    /// The root was invalid and skipped.
    Skipped(&'a FinderError),
}

/// Duplicate groups extracted at the end of a run.
#[derive(Debug, Default)]
pub struct DuplicateReport {
    /// Groups of two or more files
    pub groups: Vec<DuplicateGroup>,
    /// Sum of the full sizes of all groups
    pub duplicate_count: usize,
    /// Whether the groups were verified byte for byte
    pub verified: bool,
    /// Groups split apart by verification
    pub collisions: usize,
    /// Files dropped because they could not be re-read during verification
    pub verify_errors: Vec<HashError>,
}

/// Summary of a multi-root run.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// One report per successfully scanned root, in argument order
    pub roots: Vec<RootReport>,
    /// Roots that were skipped because they were invalid
    pub invalid_roots: Vec<FinderError>,
    /// Total files discovered across roots
    pub total_files: usize,
    /// Total files fingerprinted across roots
    pub fingerprinted: usize,
    /// Total files skipped because they could not be read
    pub skipped_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Files participating in some duplicate group
    pub duplicate_files: usize,
    /// Duration of the entire run
    pub scan_duration: std::time::Duration,
}

/// Orchestrates scanning, fingerprinting and extraction.
pub struct DuplicateFinder {
    config: FinderConfig,
    fingerprinter: Fingerprinter,
    pool: Option<rayon::ThreadPool>,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(config.io_threads.max(1))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                log::warn!(
                    "Failed to create I/O thread pool ({}), using global pool with {} threads",
                    e,
                    rayon::current_num_threads()
                );
                None
            }
        };

        Self {
            config,
            fingerprinter: Fingerprinter::new(),
            pool,
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Check that `root` can be scanned.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the path is empty, missing or not a directory.
    pub fn validate_root(root: &Path) -> Result<(), FinderError> {
        if root.as_os_str().is_empty() {
            return Err(FinderError::EmptyPath);
        }
        if !root.exists() {
            return Err(FinderError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }
        Ok(())
    }

    /// Scan one root and insert every readable file into `index`.
    ///
    /// Unreadable files and unreadable subtrees are recorded in the returned
    /// report and never reach the index.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the root itself is invalid; the index is
    /// left untouched in that case.
    pub fn scan_root(
        &self,
        root: &Path,
        index: &mut FingerprintIndex,
    ) -> Result<RootReport, FinderError> {
        Self::validate_root(root)?;

        let mut report = RootReport {
            root: root.to_path_buf(),
            ..Default::default()
        };

        let walker = Walker::new(root, self.config.walker_config.clone());
        let mut files = Vec::new();
        for result in walker.walk() {
            match result {
                Ok(path) => files.push(path),
                Err(e) => report.scan_errors.push(e),
            }
        }

        report.files_found = files.len();
        if files.is_empty() {
            log::info!("No files found under {}", root.display());
            return Ok(report);
        }

        files.retain(|path| {
            let known = index.contains(path.to_string_lossy().as_ref());
            if known {
                log::debug!("Already indexed, not fingerprinting again: {}", path.display());
            }
            !known
        });
        report.already_indexed = report.files_found - files.len();

        log::info!(
            "Fingerprinting {} file(s) under {}",
            files.len(),
            root.display()
        );

        for (path, result) in files.iter().zip(self.fingerprint_all(&files)) {
            match result {
                Ok(fp) => {
                    if index.insert(path.to_string_lossy().into_owned(), fp) {
                        report.fingerprinted += 1;
                    } else {
                        report.already_indexed += 1;
                    }
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    report.skipped.push(e);
                }
            }
        }

        Ok(report)
    }

    /// Fingerprint files in parallel; results keep the input order.
    fn fingerprint_all(&self, files: &[PathBuf]) -> Vec<Result<Fingerprint, HashError>> {
        let callback = self.config.progress_callback.clone();
        if let Some(ref cb) = callback {
            cb.on_phase_start("fingerprint", files.len());
        }

        let done = AtomicUsize::new(0);
        let compute = || {
            files
                .par_iter()
                .map(|path| {
                    let result = self.fingerprinter.calculate(path);
                    if let Some(ref cb) = callback {
                        let current = done.fetch_add(1, Ordering::Relaxed) + 1;
                        cb.on_progress(current, path.to_string_lossy().as_ref());
                    }
                    result
                })
                .collect::<Vec<_>>()
        };

        let results = match self.pool {
            Some(ref pool) => pool.install(compute),
            None => compute(),
        };

        if let Some(ref cb) = callback {
            cb.on_phase_end("fingerprint");
        }
        results
    }

    /// Extract duplicate groups from a completed index.
    ///
    /// With verification enabled, groups are re-checked byte for byte and
    /// the count is recomputed from the confirmed groups.
    #[must_use]
    pub fn finish(&self, index: &FingerprintIndex) -> DuplicateReport {
        let (groups, duplicate_count) = extract(index);

        if !self.config.verify {
            return DuplicateReport {
                groups,
                duplicate_count,
                ..Default::default()
            };
        }

        log::info!("Verifying {} group(s) byte for byte", groups.len());
        let outcome = verify_groups(groups);
        DuplicateReport {
            groups: outcome.groups,
            duplicate_count: outcome.total,
            verified: true,
            collisions: outcome.collisions,
            verify_errors: outcome.errors,
        }
    }

    /// Scan a single root and extract its duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the root is invalid, whatever the policy.
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        Self::validate_root(root)?;
        self.find_duplicates_in_paths(&[root.to_path_buf()])
    }

    /// Scan several roots into a fresh index and extract the duplicates.
    ///
    /// Invalid roots are handled according to the configured
    /// [`RootErrorPolicy`].
    ///
    /// # Errors
    ///
    /// With [`RootErrorPolicy::Abort`], returns the first invalid root's error.
    pub fn find_duplicates_in_paths(
        &self,
        roots: &[PathBuf],
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let (report, summary) = self.scan_paths(roots, |_| {})?;
        Ok((report.groups, summary))
    }

    /// Run every root through one shared index, then extract the groups.
    ///
    /// `on_root` sees each root as soon as it has been scanned or skipped,
    /// in argument order.
    ///
    /// # Errors
    ///
    /// With [`RootErrorPolicy::Abort`], returns the first invalid root's
    /// error; `on_root` is not called for it.
    pub fn scan_paths<F>(
        &self,
        roots: &[PathBuf],
        mut on_root: F,
    ) -> Result<(DuplicateReport, ScanSummary), FinderError>
    where
        F: FnMut(RootEvent<'_>),
    {
        let start_time = std::time::Instant::now();
        let mut summary = ScanSummary::default();
        let mut index = FingerprintIndex::new();

        for root in roots {
            match self.scan_root(root, &mut index) {
                Ok(report) => {
                    on_root(RootEvent::Scanned(&report));
                    summary.total_files += report.files_found;
                    summary.fingerprinted += report.fingerprinted;
                    summary.skipped_files += report.skipped.len();
                    summary.roots.push(report);
                }
                Err(e) => match self.config.root_error_policy {
                    RootErrorPolicy::Abort => return Err(e),
                    RootErrorPolicy::Skip => {
                        log::warn!("Skipping root: {}", e);
                        on_root(RootEvent::Skipped(&e));
                        summary.invalid_roots.push(e);
                    }
                },
            }
        }

        let report = self.finish(&index);
        summary.duplicate_groups = report.groups.len();
        summary.duplicate_files = report.duplicate_count;
        summary.scan_duration = start_time.elapsed();

        Ok((report, summary))
    }
}
