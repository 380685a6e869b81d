// productimporter/src/platform/types.rs
use serde::{Deserialize, Serialize};

/// Every product request and response is wrapped as `{"product": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEnvelope<T> {
    pub product: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformVariant {
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformProduct {
    pub id: u64,
    #[serde(default)]
    pub variants: Vec<PlatformVariant>,
}

impl PlatformProduct {
    pub fn has_sku(&self, sku: &str) -> bool {
        self.variants
            .iter()
            .any(|variant| variant.sku.as_deref() == Some(sku))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformImage {
    pub id: u64,
    #[serde(default)]
    pub src: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductList {
    #[serde(default)]
    pub products: Vec<PlatformProduct>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageList {
    #[serde(default)]
    pub images: Vec<PlatformImage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadedImage {
    #[serde(default)]
    pub src: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadedImageEnvelope {
    #[serde(default)]
    pub image: Option<UploadedImage>,
}

/// Variant as sent when creating a product; carries the option values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVariant {
    pub sku: String,
    pub inventory_quantity: i64,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductOption {
    pub name: String,
    pub values: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub title: Option<String>,
    pub body_html: Option<String>,
    pub variants: Vec<NewVariant>,
    pub options: Vec<ProductOption>,
}

/// Variant as sent on update. Option values are never touched after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantUpdate {
    pub sku: String,
    pub inventory_quantity: i64,
    pub price: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductUpdate {
    pub id: u64,
    pub title: Option<String>,
    pub body_html: Option<String>,
    pub variants: Vec<VariantUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageRef>>,
}
