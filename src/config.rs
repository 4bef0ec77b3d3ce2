//! Application configuration management.
//!
//! Settings are merged from several layers, later layers winning:
//!
//! 1. Compiled-in defaults
//! 2. TOML config file (platform config dir, or `--config <PATH>`)
//! 3. Environment variables prefixed with `DUPSWEEP_` (e.g. `DUPSWEEP_JOBS=4`)
//! 4. Command-line flags
//!
//! ```toml
//! # ~/.config/dupsweep/config.toml
//! block_size = 131072
//! follow_symlinks = false
//! skip_unreadable = true
//! stop_on_error = false
//! jobs = 4
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actions::DeleteConfig;
use crate::duplicates::FinderConfig;
use crate::scanner::{WalkerConfig, DEFAULT_BLOCK_SIZE};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "DUPSWEEP_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer could not be parsed or has the wrong type.
    #[error("invalid configuration: {0}")]
    Parse(#[from] Box<figment::Error>),

    /// A value parsed but is out of range.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Configuration key
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Read buffer size for hashing, in bytes.
    pub block_size: usize,
    /// Descend into symlinked directories.
    pub follow_symlinks: bool,
    /// Leave unreadable files out of the index instead of aborting the scan.
    pub skip_unreadable: bool,
    /// Stop deleting at the first failure.
    pub stop_on_error: bool,
    /// Number of hashing threads.
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            follow_symlinks: false,
            skip_unreadable: false,
            stop_on_error: false,
            jobs: 1,
        }
    }
}

/// Values supplied on the command line. `None` leaves lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_symlinks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_unreadable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_on_error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Config {
    /// Load the configuration from every layer.
    ///
    /// With `explicit` set, that file replaces the default config path and
    /// must exist. Without it, a missing default file is simply skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a file is missing, a layer fails to parse,
    /// or a value is out of range.
    pub fn load(
        explicit: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.is_file()),
        };

        match &file {
            Some(path) => log::debug!("Loading config file {}", path.display()),
            None => log::debug!("No config file, using defaults and environment"),
        }

        Self::from_figment(Self::figment(file.as_deref(), overrides))
    }

    /// Build the layered figment without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Path>, overrides: &ConfigOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Extract and validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "block_size",
                reason: "must be at least 1 byte".to_string(),
            });
        }
        if self.jobs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "jobs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupsweep").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Scanner settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_walker_config(WalkerConfig::default().with_follow_symlinks(self.follow_symlinks))
            .with_block_size(self.block_size)
            .with_jobs(self.jobs)
            .with_skip_unreadable(self.skip_unreadable)
    }

    /// Deletion settings derived from this configuration.
    #[must_use]
    pub fn delete_config(&self) -> DeleteConfig {
        DeleteConfig::default().with_continue_on_error(!self.stop_on_error)
    }
}
