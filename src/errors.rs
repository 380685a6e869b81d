// productimporter/src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Catalog record #{position} has no sku")]
    MissingSku { position: usize },

    #[error("Catalog record #{position} is invalid: {reason}")]
    InvalidRecord { position: usize, reason: String },

    #[error("Platform returned an unusable response: {0}")]
    Platform(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
