use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogBackend, FileCatalog, HttpCatalog, DEFAULT_CATALOG_URL};
use crate::error::CoreError;
use crate::storage::FileStorage;

/// Storage slot the browser shop used for its cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Top-level configuration (`storefront.json` / `config.json`).
///
/// Every field has a default, so an empty object `{}` is a valid config.
/// Unknown fields are rejected to catch typos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    /// Name of the snapshot slot.
    pub storage_key: String,
    /// Directory holding the snapshot files. Defaults to the platform data
    /// directory (see [`FileStorage::default_dir`]).
    pub data_dir: Option<PathBuf>,
    pub catalog: CatalogConfig,
    /// Prefix printed before prices.
    pub currency: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
            catalog: CatalogConfig::default(),
            currency: "Rs.".to_string(),
        }
    }
}

/// Where the product list comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// HTTP endpoint returning the JSON product array.
    pub url: String,
    /// Local JSON file to read instead of `url`. Takes precedence when set.
    pub file: Option<PathBuf>,
    /// Request timeout in seconds. No timeout when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            file: None,
            timeout_secs: None,
        }
    }
}

impl CatalogConfig {
    /// Build the configured source.
    pub fn backend(&self) -> CatalogBackend {
        if let Some(file) = &self.file {
            return CatalogBackend::File(FileCatalog::new(file.clone()));
        }
        let mut http = HttpCatalog::new(&self.url);
        if let Some(secs) = self.timeout_secs {
            http = http.with_timeout(Duration::from_secs(secs));
        }
        CatalogBackend::Http(http)
    }
}

impl StorefrontConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = fs::read_to_string(path).map_err(|e| CoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| CoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// `$XDG_CONFIG_HOME/storefront/config.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("storefront").join("config.json"))
    }

    /// Resolve the config to use.
    ///
    /// - An explicit path must exist and parse.
    /// - Otherwise the default path is loaded if it exists.
    /// - Otherwise defaults are used.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, CoreError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Directory for [`FileStorage`].
    pub fn storage_dir(&self) -> Result<PathBuf, CoreError> {
        self.data_dir
            .clone()
            .or_else(FileStorage::default_dir)
            .ok_or_else(|| CoreError::Storage {
                key: self.storage_key.clone(),
                message: "no data directory on this platform; set `data_dir`".to_string(),
            })
    }

    /// `"Rs. 12.50"`-style rendering with two decimals.
    pub fn format_price(&self, amount: f64) -> String {
        if self.currency.is_empty() {
            format!("{amount:.2}")
        } else {
            format!("{} {amount:.2}", self.currency)
        }
    }
}
