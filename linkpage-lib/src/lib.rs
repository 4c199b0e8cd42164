mod builder;
mod catalog;
mod config;
mod error;
mod export_import;
mod field;
mod sanitize;
mod schema;
mod settings;
mod utils;

pub use builder::*;
pub use catalog::*;
pub use config::*;
pub use error::*;
pub use export_import::*;
pub use field::*;
pub use sanitize::*;
pub use schema::{
    validate_app_state, validate_custom_link, validate_export_data, validate_profile,
    validate_social_link, validate_social_platform_config, SchemaErrors, Validation, Violation,
};
pub use settings::*;
pub use utils::generate_id;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Main entry point for the linkpage library
///
/// Bundles the loaded settings with the export/import pipeline so that callers
/// do not have to thread the file prefix and output directory around.
#[derive(Debug, Clone, Default)]
pub struct LinkPage {
    settings: Settings,
}

impl LinkPage {
    /// Create a LinkPage instance by loading settings from a YAML file
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = parse_settings_file(path).await?;
        Ok(Self { settings })
    }

    /// Create a LinkPage instance from already loaded settings
    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Export `state` into the configured output directory
    pub async fn export_to_dir(&self, state: &AppState) -> Result<PathBuf, ExportError> {
        save_app_data(
            state,
            self.settings.output_dir(),
            &self.settings.export.file_prefix,
        )
        .await
    }

    /// Export `state` to an explicit file path
    pub async fn export_to_file(&self, state: &AppState, path: &Path) -> Result<(), ExportError> {
        let json = export_app_data(state)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|source| ExportError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), "export written");
        Ok(())
    }

    /// Read and import an export file
    pub async fn import_file(&self, path: &Path) -> Result<AppState, ImportError> {
        upload_and_import_app_data(path).await
    }
}
