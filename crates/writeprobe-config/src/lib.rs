//! # writeprobe-config
//!
//! Configuration for the writeprobe tools.
//!
//! Loads configuration from:
//! 1. `~/.writeprobe/config.toml` (global)
//! 2. The file named by `WRITEPROBE_CONFIG` (overrides global)
//! 3. Environment variables (highest priority)
//!
//! Nothing here changes what the probe prints on stdout; it only shapes the
//! diagnostic log on stderr.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub mod logging;
pub mod testing;

pub use logging::LogLevel;

/// Env var naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "WRITEPROBE_CONFIG";
/// Env var overriding `log.level`
pub const LOG_LEVEL_ENV: &str = "WRITEPROBE_LOG_LEVEL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
}

/// Diagnostic log settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Level used when neither `WRITEPROBE_LOG` nor `RUST_LOG` is set
    pub level: LogLevel,
    /// Colorize stderr output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            ansi: false,
        }
    }
}

impl Config {
    /// Load config from standard locations
    pub fn load() -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let level = std::env::var(LOG_LEVEL_ENV).ok();
        Self::load_from(global.as_deref(), explicit.as_deref(), level.as_deref())
    }

    /// Load config from the given locations. Missing files are skipped.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        level_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Global config
        if let Some(path) = global {
            if path.exists() {
                debug!("Loading global config from {:?}", path);
                config = Self::read_file(path)?;
            }
        }

        // 2. Explicit config - overrides global
        if let Some(path) = explicit {
            if path.exists() {
                debug!("Loading config from {:?}", path);
                let other = Self::read_file(path)?;
                config.merge(other);
            }
        }

        // 3. Environment override
        if let Some(level) = level_override {
            config.log.level = LogLevel::from_str(level)?;
        }

        Ok(config)
    }

    /// Global config path: ~/.writeprobe/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".writeprobe/config.toml"))
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    // The explicit file is parsed whole, so its values (defaults included) win.
    fn merge(&mut self, other: Config) {
        self.log = other.log;
    }
}
