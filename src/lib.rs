//! FileDedupe - duplicate file finder
//!
//! Scans one or more directory trees, fingerprints every regular file with
//! CRC-32 and reports each set of files that share a fingerprint.
//!
//! The library is split into:
//! - [`scanner`]: directory walking and content fingerprinting
//! - [`duplicates`]: the fingerprint index, group extraction and the
//!   orchestrating [`duplicates::DuplicateFinder`]
//! - [`output`]: text and JSON reporters
//! - [`cli`], [`config`], [`logging`], [`progress`], [`error`]: the
//!   application shell

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, RootEvent};
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextOutput};
use crate::progress::Progress;

/// Run the application against the real stdout and stderr.
///
/// # Errors
///
/// Returns an error if a directory argument is invalid and the run is not
/// configured to keep going, or if writing the report fails.
pub fn run_app(cli: &Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let show_progress = !cli.quiet && stderr.is_terminal();
    run(cli, config, show_progress, &mut stdout.lock(), &mut stderr.lock())
}

/// Run the application with explicit output streams.
///
/// `config` is the already resolved configuration (see [`Config::resolve`]).
/// The report goes to `out`; user-facing diagnostics go to `err`.
///
/// # Errors
///
/// See [`run_app`].
pub fn run<W: Write, E: Write>(
    cli: &Cli,
    config: &Config,
    show_progress: bool,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<ExitCode> {
    for arg in &cli.invalid_args {
        writeln!(err, "Invalid command: {}", arg)?;
    }
    log::debug!("Effective configuration: {:?}", config);

    let text = config.output == OutputFormat::Text;
    if text {
        TextOutput::new(out).banner()?;
    }

    if cli.dirs.is_empty() {
        if cli.invalid_args.is_empty() {
            write!(out, "{}", cli::usage())?;
        } else {
            writeln!(err, "Error: no directory specified. Exiting")?;
            if text {
                TextOutput::new(out).total(0)?;
            }
        }
        return Ok(ExitCode::Success);
    }

    let mut finder_config = config.finder_config();
    if show_progress && text {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new()));
    }
    let finder = DuplicateFinder::new(finder_config);

    // Root lines are printed as each root finishes; the first write error
    // is kept and reported once scanning is over
    let mut written: std::io::Result<()> = Ok(());
    let scanned = finder.scan_paths(&cli.dirs, |event| {
        if written.is_err() {
            return;
        }
        written = match event {
            RootEvent::Scanned(report) if text => TextOutput::new(&mut *out).root(report),
            RootEvent::Scanned(_) => Ok(()),
            RootEvent::Skipped(e) => writeln!(err, "Error: {}. Directory will be skipped.", e),
        };
    });
    written?;
    let (report, summary) = scanned.context("Cannot scan directory")?;

    if report.collisions > 0 {
        log::warn!(
            "{} group(s) shared a fingerprint without identical content",
            report.collisions
        );
    }
    for e in &report.verify_errors {
        log::warn!("Dropped during verification: {}", e);
    }

    match config.output {
        OutputFormat::Text => TextOutput::new(out).duplicates(&report)?,
        OutputFormat::Json => JsonOutput::new(&summary.roots, &summary.invalid_roots, &report)
            .write_to(out, true)
            .context("Failed to write JSON report")?,
    }
    out.flush()?;

    Ok(ExitCode::Success)
}
