pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage;

pub use cart::{CartAction, CartItem, CartLine, CartState, CartStore, SubscriptionId};
pub use catalog::{CatalogSource, CatalogState, CatalogTask, Product};
pub use config::StorefrontConfig;
pub use error::CoreError;
pub use storage::{FileStorage, MemoryStorage, Storage};
