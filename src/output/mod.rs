//! Output formatters for duplicate scan results.
//!
//! - [`text`]: the human-readable report printed by default
//! - [`json`]: a single JSON document for automation and scripting

pub mod json;
pub mod text;

pub use json::JsonOutput;
pub use text::TextOutput;
