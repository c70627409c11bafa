//! Full configuration validation.
//!
//! Collects every range violation into a single `ConfigError`.

mod helpers;


use crate::schema::LazypaneConfig;
use lazypane_common::ConfigError;

use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Largest terminal dimension accepted anywhere in lazypane.
pub const MAX_TERMINAL_DIMENSION: u16 = 500;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &LazypaneConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_non_empty(&mut errors, "tool.program", &config.tool.program);

    let max = u32::from(MAX_TERMINAL_DIMENSION);
    validate_range(
        &mut errors,
        "terminal.default_cols",
        u32::from(config.terminal.default_cols),
        1,
        max,
    );
    validate_range(
        &mut errors,
        "terminal.default_rows",
        u32::from(config.terminal.default_rows),
        1,
        max,
    );

    validate_range_f64(&mut errors, "window.width", config.window.width, 200.0, 16384.0);
    validate_range_f64(&mut errors, "window.height", config.window.height, 200.0, 16384.0);

    validate_range(&mut errors, "panel.font_size", config.panel.font_size, 6, 48);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
