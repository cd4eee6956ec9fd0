//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Accumulating fingerprints across roots ([`FingerprintIndex`])
//! - Extracting groups of identical files ([`extract`])
//! - Optional byte-for-byte verification ([`verify_groups`])
//! - Orchestrating a run ([`DuplicateFinder`])

pub mod finder;
pub mod groups;
pub mod index;

pub use finder::{
    DuplicateFinder, DuplicateReport, FinderConfig, FinderError, RootErrorPolicy, RootEvent,
    RootReport, ScanSummary,
};
pub use groups::{extract, verify_groups, DuplicateGroup, VerifyOutcome};
pub use index::FingerprintIndex;
