//! Merge rules: defaults and override order.
//!
//! Later sources win: defaults, user file, explicit file, environment.

use crate::scan::DEFAULT_WORKERS;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("workers", DEFAULT_WORKERS as i64)?
        .set_default("attributes.mod_time", true)?
        .set_default("attributes.size", true)?
        .set_default("attributes.mode", false)?
        .set_default("attributes.name", false)?
        .set_default("attributes.path", false)
}
