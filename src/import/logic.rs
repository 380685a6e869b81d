// productimporter/src/import/logic.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::payload::{build_new_product, build_product_update};
use super::summary::ImportSummary;
use crate::config::FailurePolicy;
use crate::platform::PlatformClient;
use crate::source::{ProductRecord, ProductSource};

/// What happened to a single catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Created {
        product_id: u64,
        image_url: Option<String>,
    },
    Updated {
        product_id: u64,
        image_id: Option<u64>,
    },
}

/// Pushes catalog records to the platform one at a time: look the SKU up,
/// then either update the match or create a new product.
pub struct Importer<'a> {
    source: &'a dyn ProductSource,
    platform: &'a dyn PlatformClient,
    images_folder: PathBuf,
    failure_policy: FailurePolicy,
}

impl<'a> Importer<'a> {
    pub fn new(
        source: &'a dyn ProductSource,
        platform: &'a dyn PlatformClient,
        images_folder: impl Into<PathBuf>,
        failure_policy: FailurePolicy,
    ) -> Self {
        Importer {
            source,
            platform,
            images_folder: images_folder.into(),
            failure_policy,
        }
    }

    /// Imports every record the source produces.
    ///
    /// Records that fail validation are always reported and skipped. A failed
    /// platform call is reported and skipped under `FailurePolicy::Continue`
    /// and ends the run under `FailurePolicy::Abort`.
    pub async fn run(&self) -> Result<ImportSummary> {
        let mut summary = ImportSummary::start();
        let records = self.source.produce_records().await;

        if records.is_empty() {
            info!("📭 No products to import.");
            return Ok(summary);
        }
        info!("📦 Importing {} catalog records (on failure: {})", records.len(), self.failure_policy);

        for (index, entry) in records.into_iter().enumerate() {
            let position = index + 1;
            let record = match entry {
                Ok(record) => record,
                Err(e) => {
                    warn!("⚠️ Skipping catalog record #{}: {}", position, e);
                    summary.record_failure(position, None, e.to_string());
                    continue;
                }
            };

            match self.import_record(&record).await {
                Ok(RecordOutcome::Created { product_id, image_url }) => {
                    debug!(product_id, image = image_url.as_deref().unwrap_or("none"), "record #{} created", position);
                    summary.created += 1;
                }
                Ok(RecordOutcome::Updated { product_id, image_id }) => {
                    debug!(product_id, image_id, "record #{} updated", position);
                    summary.updated += 1;
                }
                Err(e) => {
                    warn!("❌ Failed to import record #{} (sku {}): {:#}", position, record.sku, e);
                    summary.record_failure(position, Some(&record.sku), format!("{:#}", e));

                    if self.failure_policy == FailurePolicy::Abort {
                        summary.log();
                        return Err(e.context(format!(
                            "Import aborted at record #{} (sku {})",
                            position, record.sku
                        )));
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Looks the record's SKU up and creates or updates accordingly.
    pub async fn import_record(&self, record: &ProductRecord) -> Result<RecordOutcome> {
        let existing = self
            .platform
            .find_by_sku(&record.sku)
            .await
            .with_context(|| format!("Lookup of sku {} failed", record.sku))?;

        match existing {
            Some(product) => self.update_existing(product.id, record).await,
            None => self.create_new(record).await,
        }
    }

    async fn update_existing(&self, product_id: u64, record: &ProductRecord) -> Result<RecordOutcome> {
        let image_id = match record.image.as_deref() {
            Some(file_name) => self
                .platform
                .find_image_id(product_id, file_name)
                .await
                .with_context(|| format!("Image lookup on product {} failed", product_id))?,
            None => None,
        };

        let update = build_product_update(product_id, record, image_id);
        self.platform
            .update(product_id, &update)
            .await
            .with_context(|| format!("Update of product {} failed", product_id))?;

        info!("🔄 Updated product {} (sku {})", product_id, record.sku);
        Ok(RecordOutcome::Updated { product_id, image_id })
    }

    async fn create_new(&self, record: &ProductRecord) -> Result<RecordOutcome> {
        let created = self
            .platform
            .create(&build_new_product(record))
            .await
            .context("Product creation failed")?;
        let product_id = created.id;
        info!("✨ Created product {} (sku {})", product_id, record.sku);

        let image_url = match record.image.as_deref() {
            Some(file_name) => self.attach_local_image(product_id, file_name).await?,
            None => None,
        };

        Ok(RecordOutcome::Created { product_id, image_url })
    }

    async fn attach_local_image(&self, product_id: u64, file_name: &str) -> Result<Option<String>> {
        let image_path = self.images_folder.join(file_name);
        if !local_file_exists(&image_path).await {
            debug!("No local image at {}, product {} stays without image", image_path.display(), product_id);
            return Ok(None);
        }

        let url = self
            .platform
            .upload_image(product_id, &image_path)
            .await
            .with_context(|| {
                format!(
                    "Product {} was created but uploading {} failed",
                    product_id,
                    image_path.display()
                )
            })?;
        debug!("🖼️ Uploaded {} to product {}", image_path.display(), product_id);
        Ok(url)
    }
}

async fn local_file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
