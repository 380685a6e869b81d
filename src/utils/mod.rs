// productimporter/src/utils/mod.rs
use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder};
use url::Url;

/// Installs the global fmt subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}

/// Last path segment of an image URL, ignoring query string and fragment.
/// Plain relative paths are accepted too.
pub fn file_name_from_url(src: &str) -> Option<&str> {
    if let Ok(url) = Url::parse(src) {
        if url.path().trim_end_matches('/').is_empty() {
            return None;
        }
    }

    let without_query = src.split(['?', '#']).next().unwrap_or(src);
    let name = without_query.rsplit('/').next().unwrap_or(without_query);
    (!name.is_empty()).then_some(name)
}
