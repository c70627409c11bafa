//! lazypane configuration.
//!
//! TOML-based configuration. Every section uses serde defaults, so a partial
//! (or empty) file yields a working setup that launches `lazygit`.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LazypaneConfig, LogLevel, CONFIG_SCHEMA_VERSION};
pub use toml_loader::ConfigSource;

use std::path::Path;

use lazypane_common::ConfigError;

/// Load config from `path` if given, otherwise from the platform default
/// location (creating a commented default file there on first run).
///
/// Returns where the config came from so the caller can log it.
pub fn load_config(path: Option<&Path>) -> Result<(LazypaneConfig, ConfigSource), ConfigError> {
    let (config, source) = match path {
        Some(p) => (
            toml_loader::load_from_path(p)?,
            ConfigSource::File(p.to_path_buf()),
        ),
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok((config, source))
}
