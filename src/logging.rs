//! Diagnostics on stderr through `log` and `env_logger`.
//!
//! stdout carries only the report, so every log record goes to stderr. A set
//! `RUST_LOG` takes precedence over `-v`/`-q`; otherwise the level starts at
//! warn, `-q` lowers it to errors and each `-v` raises it one step.

use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Install the process-wide logger.
///
/// A logger installed earlier (by a test harness, say) is left in place.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();
    builder.target(Target::Stderr);

    let from_env = std::env::var_os("RUST_LOG").is_some();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose, quiet));
    }

    // Module paths only help once debug output is on
    let with_module = verbose >= 2;
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if with_module {
            writeln!(
                buf,
                "{style}{:<5}{style:#} [{}] {}",
                record.level(),
                record.module_path().unwrap_or("?"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        }
    });

    if builder.try_init().is_ok() {
        log::debug!(
            "Logger ready ({})",
            if from_env { "RUST_LOG" } else { "command line" }
        );
    }
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
