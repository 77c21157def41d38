use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use storefront_core::cart::CartStore;
use storefront_core::catalog::{filter_products, find_product, load_catalog, CatalogTask};
use storefront_core::config::StorefrontConfig;
use storefront_core::storage::FileStorage;

use crate::render;

/// Command-line values that override the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub catalog_file: Option<PathBuf>,
    pub catalog_url: Option<String>,
}

/// Resolved settings shared by every command.
pub struct Ctx {
    pub config: StorefrontConfig,
}

impl Ctx {
    pub fn new(overrides: Overrides) -> Result<Self> {
        let mut config = StorefrontConfig::discover(overrides.config.as_deref())
            .context("failed to load configuration")?;
        if let Some(dir) = overrides.data_dir {
            config.data_dir = Some(dir);
        }
        if let Some(url) = overrides.catalog_url {
            config.catalog.url = url;
            config.catalog.file = None;
        }
        if let Some(file) = overrides.catalog_file {
            config.catalog.file = Some(file);
        }
        Ok(Self { config })
    }

    fn open_store(&self) -> Result<CartStore<FileStorage>> {
        let dir = self.config.storage_dir()?;
        info!(dir = %dir.display(), key = %self.config.storage_key, "opening cart");
        Ok(CartStore::open(FileStorage::new(dir), self.config.storage_key.as_str()))
    }
}

pub enum Step {
    Up,
    Down,
}

pub async fn products(ctx: &Ctx, search: Option<&str>) -> Result<()> {
    let state = CatalogTask::spawn(ctx.config.catalog.backend()).finished().await;
    if state.failure().is_some() {
        // reason already logged by the loader
        println!("Catalog unavailable");
        return Ok(());
    }
    let listed = filter_products(state.products(), search.unwrap_or(""));
    print!("{}", render::products(&listed, &ctx.config));
    Ok(())
}

pub fn cart_show(ctx: &Ctx) -> Result<()> {
    let store = ctx.open_store()?;
    print!("{}", render::cart(store.state(), &ctx.config));
    Ok(())
}

pub async fn cart_add(ctx: &Ctx, id: u64) -> Result<()> {
    let catalog = load_catalog(&ctx.config.catalog.backend()).await;
    if let Some(reason) = catalog.failure() {
        bail!("cannot add product {id}: catalog unavailable: {reason}");
    }
    let Some(product) = find_product(catalog.products(), id) else {
        bail!("no product with id {id} in the catalog");
    };
    let Some(item) = product.cart_item() else {
        bail!("product {id} cannot be added to the cart");
    };

    let mut store = ctx.open_store()?;
    store.add(item);
    let quantity = store.state().line(id).map_or(0, |line| line.quantity);
    println!("Added {} (quantity {quantity})", product.title);
    print!("{}", render::total(store.state(), &ctx.config));
    Ok(())
}

pub fn cart_remove(ctx: &Ctx, id: u64) -> Result<()> {
    let mut store = ctx.open_store()?;
    let title = store.state().line(id).map(|line| line.title.clone());
    store.remove(id);
    match title {
        Some(title) => println!("Removed {title}"),
        None => println!("Product {id} is not in the cart"),
    }
    print!("{}", render::total(store.state(), &ctx.config));
    Ok(())
}

pub fn cart_set(ctx: &Ctx, id: u64, quantity: i64) -> Result<()> {
    let mut store = ctx.open_store()?;
    if store.state().line(id).is_none() {
        warn!(id, "set quantity for a product not in the cart");
    }
    store.set_quantity(id, quantity);
    print!("{}", render::cart(store.state(), &ctx.config));
    Ok(())
}

pub fn cart_step(ctx: &Ctx, id: u64, step: Step) -> Result<()> {
    let mut store = ctx.open_store()?;
    let changed = match step {
        Step::Up => store.increment(id),
        Step::Down => store.decrement(id),
    };
    if !changed {
        match store.state().line(id) {
            None => println!("Product {id} is not in the cart"),
            Some(_) => println!("Quantity is already 1; use `cart remove {id}` to drop the line"),
        }
    }
    print!("{}", render::cart(store.state(), &ctx.config));
    Ok(())
}

pub fn cart_clear(ctx: &Ctx) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.clear();
    println!("Cart cleared");
    Ok(())
}

/// Order summary only; there is no payment flow.
pub fn checkout(ctx: &Ctx) -> Result<()> {
    let store = ctx.open_store()?;
    if store.state().is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }
    print!("{}", render::summary(store.state(), &ctx.config));
    println!("Checkout is not available yet; nothing was charged.");
    Ok(())
}
