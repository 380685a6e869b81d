// productimporter/src/source/json_file.rs
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{ProductRecord, ProductSource, SourceRecord};

/// Reads the catalog from a JSON file holding an array of product objects.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProductSource for JsonFileSource {
    async fn produce_records(&self) -> Vec<SourceRecord> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("📭 Catalog file {} does not exist, nothing to import", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("⚠️ Could not read catalog file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        parse_catalog(&content, &self.path)
    }
}

/// Splits the catalog document into validated records. Anything other than a
/// JSON array is treated as an empty catalog.
fn parse_catalog(content: &str, origin: &Path) -> Vec<SourceRecord> {
    let document: serde_json::Value = match serde_json::from_str(content) {
        Ok(document) => document,
        Err(e) => {
            warn!("⚠️ Catalog file {} is not valid JSON ({}), treating it as empty", origin.display(), e);
            return Vec::new();
        }
    };

    let entries = match document {
        serde_json::Value::Array(entries) => entries,
        other => {
            warn!(
                "⚠️ Catalog file {} does not hold a list of products (found {}), treating it as empty",
                origin.display(),
                json_kind(&other)
            );
            return Vec::new();
        }
    };

    debug!("Read {} catalog entries from {}", entries.len(), origin.display());

    entries
        .into_iter()
        .enumerate()
        .map(|(index, value)| ProductRecord::from_value(index + 1, value))
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
