// productimporter/src/platform/shopify.rs
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, multipart};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use super::types::{
    ImageList, NewProduct, PlatformProduct, PlatformVariant, ProductEnvelope, ProductList,
    ProductUpdate, UploadedImageEnvelope,
};
use super::{LOOKUP_PAGE_SIZE, PlatformClient, find_image_with_file_name, find_product_with_sku};
use crate::config::PlatformConfig;
use crate::errors::{ImportError, Result};

const ACCESS_TOKEN_HEADER: &str = "x-shopify-access-token";

/// REST Admin API client for a single store.
#[derive(Debug, Clone)]
pub struct ShopifyClient {
    http: Client,
    api_root: String,
}

impl ShopifyClient {
    pub fn new(config: &PlatformConfig) -> Result<Self> {
        let mut token = HeaderValue::from_str(&config.access_token)
            .map_err(|_| ImportError::Config("ACCESS_TOKEN contains characters not allowed in a header".to_string()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_TOKEN_HEADER, token);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let api_root = format!(
            "{}/admin/api/{}",
            config.base_url.as_str().trim_end_matches('/'),
            config.api_version
        );

        Ok(ShopifyClient { http, api_root })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path)
    }
}

#[async_trait]
impl PlatformClient for ShopifyClient {
    async fn find_by_sku(&self, sku: &str) -> Result<Option<PlatformProduct>> {
        let limit = LOOKUP_PAGE_SIZE.to_string();
        let listing: ProductList = self
            .http
            .get(self.endpoint("products.json"))
            .query(&[("fields", "id,variants"), ("limit", limit.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if listing.products.len() >= LOOKUP_PAGE_SIZE as usize {
            warn!(
                "Lookup page is full ({} products); products past the first page are not searched for sku {}",
                listing.products.len(),
                sku
            );
        }

        Ok(find_product_with_sku(&listing.products, sku).cloned())
    }

    async fn create(&self, product: &NewProduct) -> Result<PlatformProduct> {
        let body = self
            .http
            .post(self.endpoint("products.json"))
            .json(&ProductEnvelope { product })
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_created_product(&body)
    }

    async fn update(&self, product_id: u64, product: &ProductUpdate) -> Result<()> {
        self.http
            .put(self.endpoint(&format!("products/{}.json", product_id)))
            .json(&ProductEnvelope { product })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn find_image_id(&self, product_id: u64, file_name: &str) -> Result<Option<u64>> {
        let listing: ImageList = self
            .http
            .get(self.endpoint(&format!("products/{}/images.json", product_id)))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(find_image_with_file_name(&listing.images, file_name).map(|image| image.id))
    }

    async fn upload_image(&self, product_id: u64, file_path: &Path) -> Result<Option<String>> {
        if !tokio::fs::try_exists(file_path).await.unwrap_or(false) {
            debug!("Image {} does not exist, skipping upload", file_path.display());
            return Ok(None);
        }

        let bytes = tokio::fs::read(file_path).await?;
        let form = multipart::Form::new().text("image[attachment]", STANDARD.encode(bytes));

        let uploaded: UploadedImageEnvelope = self
            .http
            .post(self.endpoint(&format!("products/{}/images.json", product_id)))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(uploaded.image.and_then(|image| image.src))
    }

    async fn list_products(&self) -> Result<Value> {
        let listing = self
            .http
            .get(self.endpoint("products.json"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(listing)
    }
}

/// Reads the `{"product": {...}}` body returned by a create call. A body
/// without a numeric `product.id` is an unusable response.
pub(crate) fn parse_created_product(body: &str) -> Result<PlatformProduct> {
    let document: Value = serde_json::from_str(body)?;

    let product = document
        .get("product")
        .filter(|product| product.is_object())
        .ok_or_else(|| ImportError::Platform("create response has no product object".to_string()))?;

    let id = product
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| ImportError::Platform("create response did not include a product id".to_string()))?;

    let variants = match product.get("variants") {
        Some(variants) if !variants.is_null() => {
            serde_json::from_value::<Vec<PlatformVariant>>(variants.clone())?
        }
        _ => Vec::new(),
    };

    Ok(PlatformProduct { id, variants })
}
