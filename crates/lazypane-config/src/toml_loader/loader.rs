//! Core TOML config loading: read from path or platform default.
//!
//! Loading happens before logging is configured, so nothing here logs.
//! The caller reports the returned [`ConfigSource`] once tracing is up.

use crate::schema::LazypaneConfig;
use lazypane_common::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};

use super::paths::{create_default_config, default_config_path};

/// Where a loaded config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file.
    File(PathBuf),
    /// No file existed; a commented default was written here.
    CreatedDefault(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded config from {}", path.display()),
            ConfigSource::CreatedDefault(path) => {
                write!(f, "no config found, created default at {}", path.display())
            }
        }
    }
}

/// Load config from a specific TOML file path.
///
/// Missing fields are filled from serde defaults. Validation is left to the
/// caller.
pub fn load_from_path(path: &Path) -> Result<LazypaneConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/lazypane/config.toml`
/// On Linux: `~/.config/lazypane/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<(LazypaneConfig, ConfigSource), ConfigError> {
    load_or_create(&default_config_path()?)
}

/// Load `path`, writing a default config there first if it is missing.
pub fn load_or_create(path: &Path) -> Result<(LazypaneConfig, ConfigSource), ConfigError> {
    match load_from_path(path) {
        Ok(config) => Ok((config, ConfigSource::File(path.to_path_buf()))),
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(path)?;
            Ok((
                LazypaneConfig::default(),
                ConfigSource::CreatedDefault(path.to_path_buf()),
            ))
        }
        Err(e) => Err(e),
    }
}
