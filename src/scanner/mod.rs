//! Scanner module for directory traversal and content fingerprinting.
//!
//! This module provides functionality for:
//! - Directory walking using jwalk, optionally limited to the top level
//! - CRC-32 content fingerprinting (streaming)
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`fingerprint`]: CRC-32 file fingerprinting
//!
//! # Example
//!
//! ```no_run
//! use filededupe::scanner::{Fingerprinter, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     exclude_subdirs: true,
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("."), config);
//! let fingerprinter = Fingerprinter::new();
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => match fingerprinter.calculate(&path) {
//!             Ok(fp) => println!("{:08x} {}", fp, path.display()),
//!             Err(e) => eprintln!("Warning: {}", e),
//!         },
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod fingerprint;
pub mod walker;

use std::path::PathBuf;

pub use fingerprint::{fingerprint_to_hex, Fingerprint, Fingerprinter, BUFFER_SIZE};
pub use walker::Walker;

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Only consider files directly inside the root (depth 1).
    pub exclude_subdirs: bool,

    /// Descend into symlinked directories. Symlinked files are always yielded.
    /// Warning: May cause infinite loops with symlink cycles.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Create a new configuration from CLI arguments.
    ///
    /// # Arguments
    ///
    /// * `exclude_subdirs` - Whether to stay at the top level of each root
    /// * `follow_symlinks` - Whether to descend into symlinked directories
    #[must_use]
    pub fn new(exclude_subdirs: bool, follow_symlinks: bool) -> Self {
        Self {
            exclude_subdirs,
            follow_symlinks,
        }
    }

    /// Maximum traversal depth passed to the walker.
    ///
    /// Depth 1 covers the direct children of the root.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        if self.exclude_subdirs {
            1
        } else {
            usize::MAX
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while fingerprinting a file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path of the file that could not be fingerprinted.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}
