//! Product catalog: the records the shop lists, where they come from, and
//! the one-shot load that feeds the listing.

mod source;
mod task;

pub use source::{
    CatalogBackend, CatalogSource, FileCatalog, HttpCatalog, StaticCatalog, DEFAULT_CATALOG_URL,
};
pub use task::CatalogTask;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cart::CartItem;

/// A purchasable product as served by the catalog.
///
/// Fields the shop does not use (ratings, etc.) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// The cart reference for this product.
    ///
    /// `None` when the product cannot be added: id 0, an empty title, or a
    /// zero price.
    pub fn cart_item(&self) -> Option<CartItem> {
        if self.id == 0 || self.title.is_empty() || self.price == 0.0 {
            return None;
        }
        Some(CartItem {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            image: self.image.clone(),
        })
    }

    /// Case-insensitive substring match on title or description.
    ///
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}

/// Products matching a search box query.
///
/// A blank (empty or whitespace-only) query returns every product. Otherwise
/// the query is compared as typed, without trimming.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.trim().is_empty() {
        return products.iter().collect();
    }
    let needle = query.to_lowercase();
    products.iter().filter(|p| p.matches(&needle)).collect()
}

pub fn find_product(products: &[Product], id: u64) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Observable state of the catalog load.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Loaded(Vec<Product>),
    Failed(String),
}

impl CatalogState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }

    /// Products to list. Empty while loading and after a failure.
    pub fn products(&self) -> &[Product] {
        match self {
            CatalogState::Loaded(products) => products,
            CatalogState::Loading | CatalogState::Failed(_) => &[],
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            CatalogState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Fetch once from `source`. Failures are logged and turned into
/// [`CatalogState::Failed`]; there is no retry.
pub async fn load_catalog<C: CatalogSource>(source: &C) -> CatalogState {
    match source.fetch().await {
        Ok(products) => {
            info!(count = products.len(), "catalog loaded");
            CatalogState::Loaded(products)
        }
        Err(e) => {
            warn!(error = %e, "failed to load catalog");
            CatalogState::Failed(e.to_string())
        }
    }
}
