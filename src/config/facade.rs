//! ConfigLoader facade over the merge policy and sources.

use super::merge::merge_policy;
use super::sources::{environment, explicit_file, global_file};
use super::Settings;
use crate::error::CompareError;
use std::path::Path;
use tracing::debug;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from the user config file (if present) and environment.
    pub fn load() -> Result<Settings, CompareError> {
        Self::load_layers(None)
    }

    /// Load settings with `path` layered over the user config file.
    ///
    /// Unlike the user file, an explicit file must exist.
    pub fn load_from_file(path: &Path) -> Result<Settings, CompareError> {
        Self::load_layers(Some(path))
    }

    fn load_layers(explicit: Option<&Path>) -> Result<Settings, CompareError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = explicit_file::add_to_builder(builder, path)?;
        }
        builder = environment::add_to_builder(builder)?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        debug!(
            workers = settings.workers,
            attributes = ?settings.attributes,
            "Loaded settings"
        );
        Ok(settings)
    }
}
