//! Command implementations.

pub mod check;
pub mod render;
pub mod serve;

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use siteshell_cms::{ContentRepository, MemoryRepository, PrismicClient};
use siteshell_core::Config;

/// Load configuration with environment overrides.
pub fn load_config(config_path: &Path) -> Result<Config> {
    Config::load_with_env(config_path).wrap_err("Failed to load configuration")
}

/// Build the content repository: fixtures when given, the content API otherwise.
pub fn content_repository(
    config: &Config,
    fixtures: Option<&Path>,
) -> Result<Arc<dyn ContentRepository>> {
    match fixtures {
        Some(path) => {
            let repository = MemoryRepository::from_json_file(path)
                .wrap_err_with(|| format!("Failed to load fixtures from {}", path.display()))?;
            tracing::info!(?path, types = ?repository.document_types(), "Using fixture content");
            Ok(Arc::new(repository))
        }
        None => {
            tracing::info!(endpoint = %config.cms_endpoint(), "Using content API");
            let client =
                PrismicClient::from_config(config).wrap_err("Failed to create content client")?;
            Ok(Arc::new(client))
        }
    }
}
