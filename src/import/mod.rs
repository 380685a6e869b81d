// productimporter/src/import/mod.rs
pub(crate) mod logic;
pub(crate) mod payload;
pub(crate) mod summary;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::AppConfig;
use crate::platform::ShopifyClient;
use crate::source::JsonFileSource;

use logic::Importer;
use summary::ImportSummary;

/// Public entry point for the import process.
/// Wires the JSON catalog and the Shopify client into an `Importer` and runs it.
pub async fn run_import_flow(app_config: &AppConfig) -> Result<ImportSummary> {
    let source = JsonFileSource::new(&app_config.catalog_path);
    let client = ShopifyClient::new(&app_config.platform)
        .context("Failed to build the Shopify API client")?;

    info!(
        "Catalog: {}, images: {}, store: {}",
        source.path().display(),
        app_config.images_folder.display(),
        app_config.platform.base_url
    );

    let importer = Importer::new(
        &source,
        &client,
        &app_config.images_folder,
        app_config.failure_policy,
    );
    let summary = importer.run().await?;
    summary.log();
    Ok(summary)
}
