use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use super::Product;
use crate::error::CoreError;

/// Public store API the browser shop listed from.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Catalog source trait: yields the full product list in one call.
///
/// No parameters are sent: no paging, filtering or query strings. Filtering
/// happens locally with [`super::filter_products`].
pub trait CatalogSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;
}

/// Catalog served over HTTP as a JSON array of products.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    url: String,
    timeout: Option<Duration>,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout: None,
        }
    }

    /// Use a preconfigured client (proxy settings, TLS roots, user agent).
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            url: url.into(),
            timeout: None,
        }
    }

    /// Bound the request. Without this the fetch waits as long as the
    /// transport allows.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

impl CatalogSource for HttpCatalog {
    async fn fetch(&self) -> Result<Vec<Product>, CoreError> {
        let mut request = self.client.get(&self.url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::Catalog(format!("request to {} failed: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Catalog(format!("{} returned status {status}", self.url)));
        }

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| CoreError::Catalog(format!("invalid catalog payload from {}: {e}", self.url)))
    }
}

/// Catalog read from a local JSON file in the same format as the HTTP API.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    async fn fetch(&self) -> Result<Vec<Product>, CoreError> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CoreError::Catalog(format!("failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            CoreError::Catalog(format!("invalid catalog payload in {}: {e}", self.path.display()))
        })
    }
}

/// Either configured source, chosen at runtime.
#[derive(Debug, Clone)]
pub enum CatalogBackend {
    Http(HttpCatalog),
    File(FileCatalog),
}

impl CatalogSource for CatalogBackend {
    async fn fetch(&self) -> Result<Vec<Product>, CoreError> {
        match self {
            CatalogBackend::Http(source) => source.fetch().await,
            CatalogBackend::File(source) => source.fetch().await,
        }
    }
}

/// Fixed in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl CatalogSource for StaticCatalog {
    async fn fetch(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.products.clone())
    }
}
