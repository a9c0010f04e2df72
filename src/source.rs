//! Catalog sources
//!
//! This module defines the `CatalogSource` trait that abstracts where the
//! translation catalog comes from, with an HTTP implementation for deployed
//! pages and a file implementation for local use.
//!
//! # Example
//!
//! ```ignore
//! use tablonaute_i18n::{CatalogSource, HttpCatalogSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpCatalogSource::new("https://tablonaute.app")?;
//!     let catalog = source.fetch().await?;
//!     println!("{:?}", catalog.message("fr", "greet"));
//!     Ok(())
//! }
//! ```

use crate::catalog::Catalog;
use crate::error::{I18nError, I18nResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path of the catalog relative to the site root
pub const DEFAULT_CATALOG_PATH: &str = "/lang/translations.json";

/// Environment variable holding the site base URL for [`HttpCatalogSource::from_env`]
pub const BASE_URL_ENV: &str = "TABLONAUTE_BASE_URL";

/// Anything that can produce a full translation catalog
///
/// Implementations perform a single fetch per call. The controller calls
/// `fetch` at most once per lifetime, so implementations need no caching.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and parse the whole catalog
    ///
    /// # Returns
    ///
    /// * `Ok(Catalog)` - The parsed catalog
    /// * `Err(I18nError)` - On transport failure or a malformed payload
    async fn fetch(&self) -> I18nResult<Catalog>;

    /// Name of this source, used in log events
    fn source_name(&self) -> &str;
}

/// Fetches the catalog JSON over HTTP
#[derive(Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    /// Source for `<base_url>/lang/translations.json` with no request timeout
    pub fn new(base_url: &str) -> I18nResult<Self> {
        Self::with_options(base_url, DEFAULT_CATALOG_PATH, None)
    }

    /// Source with an explicit catalog path and optional request timeout
    pub fn with_options(
        base_url: &str,
        catalog_path: &str,
        timeout: Option<Duration>,
    ) -> I18nResult<Self> {
        if base_url.trim().is_empty() {
            return Err(I18nError::Config("base URL cannot be empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| I18nError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: join_url(base_url, catalog_path),
        })
    }

    /// Create a source from the `TABLONAUTE_BASE_URL` environment variable
    pub fn from_env() -> I18nResult<Self> {
        let base_url = std::env::var(BASE_URL_ENV).map_err(|_| {
            I18nError::Config(format!("{} environment variable not set", BASE_URL_ENV))
        })?;
        Self::new(&base_url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> I18nResult<Catalog> {
        tracing::debug!(url = %self.url, "fetching catalog");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(I18nError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Catalog::from_json_str(&body)
    }

    fn source_name(&self) -> &str {
        "http"
    }
}

/// Reads the catalog JSON from a local file
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> I18nResult<Catalog> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| I18nError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        Catalog::from_json_str(&content)
    }

    fn source_name(&self) -> &str {
        "file"
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
