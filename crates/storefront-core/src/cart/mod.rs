//! Cart data model, the pure reducer over it, and the owning store.

pub mod reducer;
pub mod store;

use serde::{Deserialize, Serialize};

pub use reducer::{reduce, CartAction};
pub use store::{CartStore, SubscriptionId};

/// A product reference without a quantity: the input of an add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

/// One product held in the cart.
///
/// `quantity` is at least 1 while the line exists. Mutations that would take
/// it to zero or below remove the line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    fn from_item(item: &CartItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            price: item.price,
            image: item.image.clone(),
            quantity: 1,
        }
    }

    /// `price × quantity` for this line.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Cart contents plus the derived total.
///
/// Lines are unique by id and kept in first-add order. The total is never
/// set directly: it is recomputed from the lines after every mutation, so
/// the fields stay private and changes go through [`reduce`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLine>,
    total_price: f64,
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from already-validated lines.
    pub(crate) fn from_lines(items: Vec<CartLine>) -> Self {
        let mut state = Self { items, total_price: 0.0 };
        state.recompute_total();
        state
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// The line for `id`, if the product is in the cart.
    pub fn line(&self, id: u64) -> Option<&CartLine> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute_total(&mut self) {
        // fold from +0.0 so an empty cart serializes as 0.0, not -0.0
        self.total_price = self.items.iter().fold(0.0, |acc, line| acc + line.subtotal());
    }
}
