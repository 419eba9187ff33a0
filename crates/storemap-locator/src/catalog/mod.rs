//! Location store: loads the store catalog once at startup.
//!
//! The catalog can live on disk or behind an HTTP URL. [`load_catalog`]
//! never fails: transport or parse problems are logged and an empty catalog
//! is returned so the rest of the page still works.

mod fetch;

use std::path::PathBuf;
use std::time::Duration;

use storemap_core::StoreCatalog;

use crate::error::LocatorError;

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Classify a configured source: `http://` and `https://` strings are
    /// URLs, anything else is a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }

    fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Url(url) => url.clone(),
        }
    }
}

/// Options for the HTTP fetch path.
#[derive(Debug, Clone)]
pub struct CatalogFetchOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogFetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "storemap/0.1 (store-locator)".to_string(),
        }
    }
}

/// Load and parse the catalog, surfacing any failure.
///
/// # Errors
///
/// - [`LocatorError::Io`] if the file cannot be read.
/// - [`LocatorError::Http`] / [`LocatorError::HttpStatus`] if the URL fetch fails.
/// - [`LocatorError::Deserialize`] if the body is not a catalog object.
pub async fn try_load_catalog(
    source: &CatalogSource,
    options: &CatalogFetchOptions,
) -> Result<StoreCatalog, LocatorError> {
    let text = match source {
        CatalogSource::File(path) => fetch::read_file(path).await?,
        CatalogSource::Url(url) => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(options.timeout_secs))
                .connect_timeout(Duration::from_secs(10))
                .build()?;
            fetch::fetch_text(&client, url, &options.user_agent).await?
        }
    };

    StoreCatalog::from_json(&text).map_err(|source_err| LocatorError::Deserialize {
        context: source.describe(),
        source: source_err,
    })
}

/// Load the catalog, falling back to an empty catalog on any failure.
pub async fn load_catalog(source: &CatalogSource, options: &CatalogFetchOptions) -> StoreCatalog {
    match try_load_catalog(source, options).await {
        Ok(catalog) => {
            tracing::info!(
                source = %source.describe(),
                stores = catalog.len(),
                "loaded store catalog"
            );
            catalog
        }
        Err(err) => {
            tracing::warn!(
                source = %source.describe(),
                error = %err,
                "failed to load store catalog; continuing with an empty catalog"
            );
            StoreCatalog::default()
        }
    }
}
