// productimporter/src/source/mod.rs
pub(crate) mod json_file;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::errors::{ImportError, Result};

pub use json_file::JsonFileSource;

/// One catalog entry after boundary validation. A bad entry keeps its slot so
/// the importer can report it alongside the good ones.
pub type SourceRecord = Result<ProductRecord>;

/// Anything that can hand the importer a list of catalog records.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Reads the backing catalog from scratch. An absent or unreadable
    /// catalog yields an empty list, never an error.
    async fn produce_records(&self) -> Vec<SourceRecord>;
}

/// Exact decimal price as given in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// Wire form: at least two decimal places, never rounded.
    pub fn to_wire(&self) -> String {
        let mut value = self.0;
        if value.scale() < 2 {
            value.rescale(2);
        }
        value.to_string()
    }

    /// Wire form of an optional price; absent prices go out as `0.00`.
    pub fn wire_or_default(price: Option<&Price>) -> String {
        price.map(Price::to_wire).unwrap_or_else(|| "0.00".to_string())
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let text = s.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map(Price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub color: Option<String>,
    pub memory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub sku: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub stock: i64,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub attributes: Attributes,
}

// Shape of a catalog entry as it appears in the file
#[derive(Debug, Deserialize)]
struct RawRecord {
    sku: Option<String>,
    name: Option<String>,
    description: Option<String>,
    stock: Option<i64>,
    price: Option<RawPrice>,
    image: Option<String>,
    #[serde(default)]
    attributes: Option<RawAttributes>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawAttributes {
    color: Option<String>,
    memory: Option<String>,
}

impl ProductRecord {
    /// Validates one catalog entry. `position` is 1-based and only used for reporting.
    pub fn from_value(position: usize, value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ImportError::InvalidRecord {
                position,
                reason: "expected a JSON object".to_string(),
            });
        }

        let raw: RawRecord =
            serde_json::from_value(value).map_err(|e| ImportError::InvalidRecord {
                position,
                reason: e.to_string(),
            })?;

        // Stored verbatim: matching against remote variants is exact.
        let sku = raw
            .sku
            .filter(|s| !s.trim().is_empty())
            .ok_or(ImportError::MissingSku { position })?;

        let price = match raw.price {
            Some(RawPrice::Number(n)) => Some(n.to_string().parse::<Price>()),
            Some(RawPrice::Text(t)) => Some(t.parse::<Price>()),
            None => None,
        }
        .transpose()
        .map_err(|e| ImportError::InvalidRecord {
            position,
            reason: format!("price is not a decimal number: {}", e),
        })?;

        let attributes = raw.attributes.unwrap_or_default();

        Ok(ProductRecord {
            sku,
            name: raw.name,
            description: raw.description,
            stock: raw.stock.unwrap_or(0),
            price,
            image: raw.image.filter(|s| !s.trim().is_empty()),
            attributes: Attributes {
                color: attributes.color,
                memory: attributes.memory,
            },
        })
    }
}
