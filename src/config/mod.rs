// productimporter/src/config/mod.rs
use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_VERSION: &str = "2025-01";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// What to do with the rest of the catalog once a platform call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next record.
    #[default]
    Continue,
    /// Stop the run at the first platform failure.
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(anyhow::anyhow!(
                "Invalid failure policy: {}. Valid options are: continue, abort",
                other
            )),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Continue => write!(f, "continue"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

// Values as read from the environment, before validation
#[derive(Debug, Clone, Default)]
pub struct RawEnvConfig {
    pub json_file_path: Option<String>,
    pub shopify_url: Option<String>,
    pub access_token: Option<String>,
    pub images_folder_path: Option<String>,
    pub api_version: Option<String>,
    pub failure_policy: Option<String>,
    pub http_timeout_secs: Option<String>,
}

impl RawEnvConfig {
    /// Reads every known key through `lookup`. Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        RawEnvConfig {
            json_file_path: get("JSON_FILE_PATH"),
            shopify_url: get("SHOPIFY_URL"),
            access_token: get("ACCESS_TOKEN"),
            images_folder_path: get("IMAGES_FOLDER_PATH"),
            api_version: get("SHOPIFY_API_VERSION"),
            failure_policy: get("IMPORT_FAILURE_POLICY"),
            http_timeout_secs: get("HTTP_TIMEOUT_SECS"),
        }
    }

    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub base_url: Url,
    pub access_token: String,
    pub api_version: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub images_folder: PathBuf,
    pub platform: PlatformConfig,
    pub failure_policy: FailurePolicy,
}

impl AppConfig {
    pub fn load_from_env() -> Result<Self> {
        Self::from_raw(RawEnvConfig::from_process_env())
    }

    pub fn from_raw(raw: RawEnvConfig) -> Result<Self> {
        let catalog_path = raw
            .json_file_path
            .context("JSON_FILE_PATH must be set")?;
        let shopify_url = raw.shopify_url.context("SHOPIFY_URL must be set")?;
        let access_token = raw.access_token.context("ACCESS_TOKEN must be set")?;
        let images_folder = raw
            .images_folder_path
            .context("IMAGES_FOLDER_PATH must be set")?;

        let base_url = Url::parse(shopify_url.trim())
            .with_context(|| format!("SHOPIFY_URL is not a valid URL: {}", shopify_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("SHOPIFY_URL cannot be used as a base URL: {}", shopify_url);
        }

        let failure_policy = match raw.failure_policy {
            Some(value) => value
                .parse::<FailurePolicy>()
                .context("IMPORT_FAILURE_POLICY is invalid")?,
            None => FailurePolicy::default(),
        };

        let timeout_secs = match raw.http_timeout_secs {
            Some(value) => value.trim().parse::<u64>().with_context(|| {
                format!("HTTP_TIMEOUT_SECS must be a whole number of seconds, got {}", value)
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(AppConfig {
            catalog_path: PathBuf::from(catalog_path),
            images_folder: PathBuf::from(images_folder),
            platform: PlatformConfig {
                base_url,
                access_token,
                api_version: raw
                    .api_version
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            failure_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("JSON_FILE_PATH", "data/products.json"),
            ("SHOPIFY_URL", "https://example.myshopify.com/"),
            ("ACCESS_TOKEN", "shpat_test"),
            ("IMAGES_FOLDER_PATH", "data/images"),
        ]
    }

    #[test]
    fn test_load_with_required_keys_uses_defaults() -> anyhow::Result<()> {
        let config = AppConfig::from_raw(RawEnvConfig::from_lookup(lookup_from(&required())))?;

        assert_eq!(config.catalog_path, PathBuf::from("data/products.json"));
        assert_eq!(config.images_folder, PathBuf::from("data/images"));
        assert_eq!(config.platform.access_token, "shpat_test");
        assert_eq!(config.platform.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.platform.timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        Ok(())
    }

    #[test]
    fn test_load_with_optional_overrides() -> anyhow::Result<()> {
        let mut pairs = required();
        pairs.push(("SHOPIFY_API_VERSION", "2024-10"));
        pairs.push(("IMPORT_FAILURE_POLICY", "Abort"));
        pairs.push(("HTTP_TIMEOUT_SECS", "5"));

        let config = AppConfig::from_raw(RawEnvConfig::from_lookup(lookup_from(&pairs)))?;

        assert_eq!(config.platform.api_version, "2024-10");
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.platform.timeout, Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn test_missing_required_key_names_it() {
        for missing in ["JSON_FILE_PATH", "SHOPIFY_URL", "ACCESS_TOKEN", "IMAGES_FOLDER_PATH"] {
            let pairs: Vec<_> = required().into_iter().filter(|(k, _)| *k != missing).collect();
            let err = AppConfig::from_raw(RawEnvConfig::from_lookup(lookup_from(&pairs)))
                .expect_err("config without a required key must fail");
            assert!(err.to_string().contains(missing), "error was: {}", err);
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut pairs = required();
        pairs.retain(|(k, _)| *k != "ACCESS_TOKEN");
        pairs.push(("ACCESS_TOKEN", "   "));

        let result = AppConfig::from_raw(RawEnvConfig::from_lookup(lookup_from(&pairs)));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_url_and_policy_are_rejected() {
        let mut bad_url = required();
        bad_url.retain(|(k, _)| *k != "SHOPIFY_URL");
        bad_url.push(("SHOPIFY_URL", "not a url"));
        assert!(AppConfig::from_raw(RawEnvConfig::from_lookup(lookup_from(&bad_url))).is_err());

        let mut bad_policy = required();
        bad_policy.push(("IMPORT_FAILURE_POLICY", "retry"));
        assert!(AppConfig::from_raw(RawEnvConfig::from_lookup(lookup_from(&bad_policy))).is_err());

        let mut bad_timeout = required();
        bad_timeout.push(("HTTP_TIMEOUT_SECS", "soon"));
        assert!(AppConfig::from_raw(RawEnvConfig::from_lookup(lookup_from(&bad_timeout))).is_err());
    }
}
