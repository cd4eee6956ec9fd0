//! Command-line interface definitions for filededupe.
//!
//! The CLI is defined with the clap derive API. Before clap sees the
//! arguments, [`normalize_args`] rewrites the traditional single-dash,
//! case-insensitive spellings (`-nosubdirs`, `-help`, `--NoSubDirs`, ...)
//! into canonical long flags and sets aside any unrecognized dash argument,
//! which is reported but never aborts the run.
//!
//! # Example
//!
//! ```bash
//! # Scan two directories, including all subdirectories
//! filededupe ~/Pictures /mnt/backup/Pictures
//!
//! # Only look at the top level of each directory
//! filededupe -nosubdirs ~/Downloads
//!
//! # Verify groups byte for byte and print JSON
//! filededupe --verify --output json ~/Documents
//! ```

use clap::{CommandFactory, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

/// Find duplicate files by CRC-32 content fingerprint.
///
/// Scans one or more directories (including subdirectories unless
/// -nosubdirs is given) and lists every set of files with identical content.
#[derive(Debug, Parser)]
#[command(name = "filededupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories to scan for duplicates
    #[arg(value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Do not check subdirectories (default: checks all subdirectories)
    #[arg(long)]
    pub nosubdirs: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Skip directories that are missing or not directories instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Confirm each duplicate group byte for byte after fingerprint matching
    ///
    /// Slower, but rules out fingerprint collisions.
    #[arg(long)]
    pub verify: bool,

    /// Number of I/O threads for fingerprinting (default: 4)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dash arguments that were not recognized and were left out
    #[arg(skip)]
    pub invalid_args: Vec<String>,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text report
    #[default]
    Text,
    /// JSON document for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Arguments after legacy spellings have been rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    /// Arguments ready for clap, program name first
    pub args: Vec<OsString>,
    /// Unrecognized dash arguments, in order of appearance
    pub invalid: Vec<String>,
}

/// Flags that consume a value.
const VALUE_FLAGS: &[&str] = &["threads", "output", "config"];

/// The only spellings that request help. Matched exactly.
const HELP_SPELLINGS: &[&str] = &["-h", "-help", "--h", "--help"];

/// Map a flag name (without dashes) to its canonical long form.
fn canonical_flag(name: &str) -> Option<&'static str> {
    // -V is the only case-sensitive spelling, -v means verbose
    if name == "V" {
        return Some("version");
    }

    let flag = match name.to_ascii_lowercase().as_str() {
        "nosubdirs" => "nosubdirs",
        "v" | "verbose" => "verbose",
        "q" | "quiet" => "quiet",
        "version" => "version",
        "keep-going" | "keepgoing" => "keep-going",
        "verify" => "verify",
        "follow-symlinks" => "follow-symlinks",
        "t" | "threads" => "threads",
        "o" | "output" => "output",
        "config" => "config",
        _ => return None,
    };
    Some(flag)
}

/// Rewrite raw process arguments into clap-ready form.
///
/// Any argument not starting with `-` is a directory and is passed through
/// byte for byte, so non-UTF-8 names survive. Recognized flags take one or
/// two dashes in any letter case; help is only `-h`, `-help`, `--h` or
/// `--help`. `-vv`/`-vvv` expand to repeated `--verbose`. Unknown dash
/// arguments are collected in [`NormalizedArgs::invalid`].
///
/// # Examples
///
/// ```
/// use filededupe::cli::normalize_args;
///
/// let n = normalize_args(["filededupe", "-NoSubDirs", "-x", "dir"]);
/// assert_eq!(n.args, vec!["filededupe", "--nosubdirs", "dir"]);
/// assert_eq!(n.invalid, vec!["-x"]);
/// ```
pub fn normalize_args<I, S>(raw: I) -> NormalizedArgs
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut iter = raw.into_iter().map(Into::into);
    let mut out = NormalizedArgs::default();

    out.args
        .push(iter.next().unwrap_or_else(|| OsString::from("filededupe")));

    while let Some(raw_arg) = iter.next() {
        if !raw_arg.to_string_lossy().starts_with('-') {
            out.args.push(raw_arg);
            continue;
        }
        let arg = raw_arg.to_string_lossy().into_owned();

        if HELP_SPELLINGS.contains(&arg.as_str()) {
            out.args.push(OsString::from("--help"));
            continue;
        }

        let body = arg.trim_start_matches('-');
        let dashes = arg.len() - body.len();
        if dashes > 2 {
            out.invalid.push(arg);
            continue;
        }

        let (name, inline_value) = match body.split_once('=') {
            Some((n, v)) => (n, Some(OsString::from(v))),
            None => (body, None),
        };

        if dashes == 1
            && name.len() > 1
            && name.chars().all(|c| c == 'v')
            && inline_value.is_none()
        {
            for _ in 0..name.len() {
                out.args.push(OsString::from("--verbose"));
            }
            continue;
        }

        let Some(flag) = canonical_flag(name) else {
            out.invalid.push(arg);
            continue;
        };

        if VALUE_FLAGS.contains(&flag) {
            match inline_value.or_else(|| iter.next()) {
                Some(value) => {
                    let mut joined = OsString::from(format!("--{}=", flag));
                    joined.push(value);
                    out.args.push(joined);
                }
                None => out.args.push(OsString::from(format!("--{}", flag))),
            }
        } else if inline_value.is_some() {
            out.invalid.push(arg);
        } else {
            out.args.push(OsString::from(format!("--{}", flag)));
        }
    }

    out
}

impl Cli {
    /// Parse process-style arguments, accepting the legacy flag spellings.
    ///
    /// # Errors
    ///
    /// Returns the clap error for help/version requests and for malformed
    /// values; callers usually hand it to [`clap::Error::exit`].
    pub fn parse_legacy<I, S>(raw: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let normalized = normalize_args(raw);
        let mut cli = Self::try_parse_from(&normalized.args)?;
        cli.invalid_args = normalized.invalid;
        Ok(cli)
    }
}

/// Render the usage text shown when no directory is given.
#[must_use]
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}
