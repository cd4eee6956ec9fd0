//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config PATH`, else `filededupe.toml` in the platform
//!    config directory)
//! 3. `FILEDEDUPE_*` environment variables (e.g. `FILEDEDUPE_IO_THREADS=8`)
//! 4. Command-line flags, applied with [`Config::apply_cli`]
//!
//! A broken file never stops a run; it is reported and the defaults are used.

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{FinderConfig, RootErrorPolicy};
use crate::scanner::WalkerConfig;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "FILEDEDUPE_";

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "filededupe.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Threads used for fingerprinting
    pub io_threads: usize,
    /// Only scan the top level of each directory
    pub exclude_subdirs: bool,
    /// Descend into symlinked directories while walking
    pub follow_symlinks: bool,
    /// Verify duplicate groups byte for byte
    pub verify: bool,
    /// Skip invalid directories instead of aborting
    pub keep_going: bool,
    /// Report format
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            io_threads: 4,
            exclude_subdirs: false,
            follow_symlinks: false,
            verify: false,
            keep_going: false,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration, preferring `explicit` over the default file path.
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from_path(path),
            None => {
                log::debug!("No config directory available, using defaults and environment");
                Self::extract_or_default(Self::base_figment())
            }
        }
    }

    /// Load configuration from a specific TOML file plus the environment.
    ///
    /// A missing file contributes nothing.
    pub fn load_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        Self::extract_or_default(Self::figment_for(path))
    }

    /// The figment stack for a given file: defaults, file, environment.
    #[must_use]
    pub fn figment_for(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    fn extract_or_default(figment: Figment) -> Self {
        match figment.extract::<Self>() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid configuration ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Default platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "filededupe", "filededupe")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The effective settings for a parsed command line: every file and
    /// environment layer, then the flags on top.
    #[must_use]
    pub fn resolve(cli: &Cli) -> Self {
        let mut config = Self::load(cli.config.as_deref());
        config.apply_cli(cli);
        config
    }

    /// Overlay command-line flags. Switches only ever turn settings on.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(threads) = cli.threads {
            self.io_threads = threads;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        self.exclude_subdirs |= cli.nosubdirs;
        self.follow_symlinks |= cli.follow_symlinks;
        self.verify |= cli.verify;
        self.keep_going |= cli.keep_going;
    }

    /// Policy applied to invalid directory arguments.
    #[must_use]
    pub fn root_error_policy(&self) -> RootErrorPolicy {
        if self.keep_going {
            RootErrorPolicy::Skip
        } else {
            RootErrorPolicy::Abort
        }
    }

    /// Build the finder configuration these settings describe.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_io_threads(self.io_threads)
            .with_walker_config(WalkerConfig::new(self.exclude_subdirs, self.follow_symlinks))
            .with_verify(self.verify)
            .with_root_error_policy(self.root_error_policy())
    }
}
