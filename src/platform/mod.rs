// productimporter/src/platform/mod.rs
pub(crate) mod shopify;
pub(crate) mod types;

use async_trait::async_trait;
use std::path::Path;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::utils::file_name_from_url;

pub use shopify::ShopifyClient;
pub use types::{
    ImageRef, NewProduct, NewVariant, PlatformImage, PlatformProduct, ProductOption,
    ProductUpdate, VariantUpdate,
};

/// Products fetched in the single lookup page. Catalogs beyond this size are
/// not searched past the first page.
pub const LOOKUP_PAGE_SIZE: u32 = 250;

/// Operations the importer needs from the remote store. Each call maps to one
/// HTTP request with no caching or retry.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// First product on the lookup page with a variant whose SKU equals `sku`.
    async fn find_by_sku(&self, sku: &str) -> Result<Option<PlatformProduct>>;

    /// Creates a product. Fails if the response does not carry an id.
    async fn create(&self, product: &NewProduct) -> Result<PlatformProduct>;

    async fn update(&self, product_id: u64, product: &ProductUpdate) -> Result<()>;

    /// Id of the first image on the product whose URL ends in `file_name`.
    async fn find_image_id(&self, product_id: u64, file_name: &str) -> Result<Option<u64>>;

    /// Uploads a local file as a product image and returns its remote URL.
    /// Returns `None` without calling out if the file does not exist.
    async fn upload_image(&self, product_id: u64, file_path: &Path) -> Result<Option<String>>;

    /// Unfiltered product listing, for diagnostics.
    async fn list_products(&self) -> Result<serde_json::Value>;
}

/// Public entry point for the diagnostic listing: prints the store's full
/// product listing as pretty JSON.
pub async fn run_listing_flow(app_config: &AppConfig) -> anyhow::Result<()> {
    use anyhow::Context;

    let client = ShopifyClient::new(&app_config.platform)
        .context("Failed to build the Shopify API client")?;
    let listing = client
        .list_products()
        .await
        .context("Failed to fetch the product listing")?;

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

pub fn find_product_with_sku<'a>(
    products: &'a [PlatformProduct],
    sku: &str,
) -> Option<&'a PlatformProduct> {
    products.iter().find(|product| product.has_sku(sku))
}

pub fn find_image_with_file_name<'a>(
    images: &'a [PlatformImage],
    file_name: &str,
) -> Option<&'a PlatformImage> {
    images.iter().find(|image| {
        image
            .src
            .as_deref()
            .and_then(file_name_from_url)
            .is_some_and(|name| name == file_name)
    })
}
