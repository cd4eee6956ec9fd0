//! Directory walker implementation using jwalk.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing one root
//! directory and yielding the paths of the regular files beneath it.
//! Traversal can be limited to the root's direct children.
//!
//! # Features
//!
//! - Deterministic output: children are sorted by file name
//! - Optional depth limit (top level only)
//! - Symlinked files are included; symlinked directories only when following
//! - Errors on individual entries are yielded, not swallowed
//!
//! # Example
//!
//! ```no_run
//! use filededupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::{ScanError, WalkerConfig};

/// Directory walker for file discovery under a single root.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Walk the directory tree and yield regular-file paths.
    ///
    /// Paths are joined onto the root exactly as it was given; nothing is
    /// canonicalized. Entries that cannot be read are yielded as
    /// [`ScanError`] so the caller can keep what was already found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use filededupe::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .max_depth(self.config.max_depth())
            .follow_links(self.config.follow_symlinks)
            .skip_hidden(false)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                // Sort children for deterministic output
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    // The root itself is never a candidate
                    if entry.depth == 0 {
                        return None;
                    }

                    let path = entry.path();
                    let file_type = entry.file_type();

                    if file_type.is_dir() {
                        return None;
                    }

                    // Links to files always count; follow_symlinks only
                    // decides whether linked directories are descended into
                    if file_type.is_symlink() {
                        return match std::fs::metadata(&path) {
                            Ok(meta) if meta.is_file() => {
                                log::debug!("{}", path.display());
                                Some(Ok(path))
                            }
                            Ok(_) => {
                                log::trace!("Not following directory link: {}", path.display());
                                None
                            }
                            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                                log::trace!("Skipping dangling link: {}", path.display());
                                None
                            }
                            Err(e) => Some(self.handle_io_error(&path, e)),
                        };
                    }

                    if !file_type.is_file() {
                        log::trace!("Skipping special file: {}", path.display());
                        return None;
                    }

                    log::debug!("{}", path.display());
                    Some(Ok(path))
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                    Some(self.handle_jwalk_error(path, e))
                }
            })
    }

    /// Handle I/O errors during file access.
    fn handle_io_error(&self, path: &Path, error: std::io::Error) -> Result<PathBuf, ScanError> {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
                Err(ScanError::PermissionDenied(path.to_path_buf()))
            }
            ErrorKind::NotFound => {
                log::debug!("File not found (may have been deleted): {}", path.display());
                Err(ScanError::NotFound(path.to_path_buf()))
            }
            _ => {
                log::warn!("I/O error for {}: {}", path.display(), error);
                Err(ScanError::Io {
                    path: path.to_path_buf(),
                    source: error,
                })
            }
        }
    }

    /// Handle jwalk errors.
    fn handle_jwalk_error(&self, path: PathBuf, error: jwalk::Error) -> Result<PathBuf, ScanError> {
        log::warn!("Walker error for {}: {}", path.display(), error);
        match error.io_error().map(std::io::Error::kind) {
            Some(std::io::ErrorKind::PermissionDenied) => Err(ScanError::PermissionDenied(path)),
            Some(std::io::ErrorKind::NotFound) => Err(ScanError::NotFound(path)),
            _ => Err(ScanError::Io {
                path,
                source: std::io::Error::other(error.to_string()),
            }),
        }
    }
}
