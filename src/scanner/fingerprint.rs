//! CRC-32 content fingerprinting with streaming reads.
//!
//! # Overview
//!
//! A fingerprint is the CRC-32 (zlib polynomial) of a file's full content,
//! widened to `u64`. Files are read in fixed-size chunks so memory use stays
//! constant regardless of file size.
//!
//! Two files with identical content always share a fingerprint. Different
//! content usually, but not provably, produces different fingerprints; use
//! [`compare_files`] when a byte-for-byte answer is needed.
//!
//! # Example
//!
//! ```no_run
//! use filededupe::scanner::Fingerprinter;
//! use std::path::Path;
//!
//! let fingerprinter = Fingerprinter::new();
//! let fp = fingerprinter.calculate(Path::new("some_file.txt")).unwrap();
//! println!("{:08x}", fp);
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// Content fingerprint: a CRC-32 widened to 64 bits.
pub type Fingerprint = u64;

/// Read buffer size for streaming fingerprinting (64 KiB).
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Streaming CRC-32 fingerprinter.
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    buffer_size: usize,
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprinter {
    /// Create a fingerprinter with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Use a custom read buffer size (at least one byte).
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Compute the fingerprint of a file's entire content.
    ///
    /// An empty file yields `0`, the CRC-32 of zero bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or fully read.
    /// The file handle is dropped on every return path.
    pub fn calculate(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let fp = self
            .calculate_reader(file)
            .map_err(|e| HashError::from_io(path, e))?;

        log::trace!("Fingerprint {:08x}: {}", fp, path.display());
        Ok(fp)
    }

    /// Compute the fingerprint of an arbitrary byte stream.
    ///
    /// # Errors
    ///
    /// Propagates any read error other than `Interrupted`.
    pub fn calculate_reader<R: Read>(&self, mut reader: R) -> std::io::Result<Fingerprint> {
        let mut buffer = vec![0u8; self.buffer_size];
        let mut hasher = crc32fast::Hasher::new();

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => hasher.update(&buffer[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(Fingerprint::from(hasher.finalize()))
    }

    /// Compute the fingerprint of an in-memory buffer.
    #[must_use]
    pub fn calculate_bytes(data: &[u8]) -> Fingerprint {
        Fingerprint::from(crc32fast::hash(data))
    }
}

/// Render a fingerprint as 8 lowercase hex digits.
#[must_use]
pub fn fingerprint_to_hex(fp: Fingerprint) -> String {
    format!("{:08x}", fp)
}

/// Compare two files byte by byte.
///
/// # Errors
///
/// Returns [`HashError`] if either file cannot be opened or read.
pub fn compare_files(a: &Path, b: &Path) -> Result<bool, HashError> {
    let meta_a = std::fs::metadata(a).map_err(|e| HashError::from_io(a, e))?;
    let meta_b = std::fs::metadata(b).map_err(|e| HashError::from_io(b, e))?;
    if meta_a.len() != meta_b.len() {
        return Ok(false);
    }

    let mut reader_a = File::open(a).map_err(|e| HashError::from_io(a, e))?;
    let mut reader_b = File::open(b).map_err(|e| HashError::from_io(b, e))?;

    let mut buf_a = vec![0u8; BUFFER_SIZE];
    let mut buf_b = vec![0u8; BUFFER_SIZE];

    loop {
        let n = read_full(&mut reader_a, &mut buf_a).map_err(|e| HashError::from_io(a, e))?;
        let m = read_full(&mut reader_b, &mut buf_b).map_err(|e| HashError::from_io(b, e))?;

        if n != m || buf_a[..n] != buf_b[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows, returning the bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
