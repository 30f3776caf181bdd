//! CLI command implementations.
//!
//! Commands operate on the same catalog and data directory as the storefront
//! server, through the storefront's own stores.

pub mod cart;
pub mod catalog;
pub mod recent;

use std::path::PathBuf;

use thiserror::Error;

use bazaar_storefront::catalog::{Catalog, CatalogError};
use bazaar_storefront::config::{ConfigError, StorefrontConfig};
use bazaar_storefront::events::EventBus;
use bazaar_storefront::services::{CartError, CartStore, RecentlyViewedStore, ShippingRules};
use bazaar_storefront::storage::{FileStore, StorageError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid size: {0}")]
    InvalidSize(String),
}

/// Shared handles for a single command run.
pub struct Context {
    pub catalog: Catalog,
    pub cart: CartStore,
    pub recent: RecentlyViewedStore,
    pub shipping: ShippingRules,
}

impl Context {
    /// Open the catalog and data directory.
    ///
    /// Explicit paths win over `STOREFRONT_CATALOG_PATH` / `STOREFRONT_DATA_DIR`.
    /// Unlike the server, a catalog that fails to load is an error here.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if configuration, catalog or storage cannot be loaded.
    pub fn open(catalog: Option<PathBuf>, data_dir: PathBuf) -> Result<Self, CommandError> {
        let config = StorefrontConfig::from_env()?;
        let catalog_path = catalog.unwrap_or(config.catalog_path);

        let catalog = Catalog::load(&catalog_path)?;
        let storage = std::sync::Arc::new(FileStore::open(&data_dir)?);
        tracing::debug!(
            catalog = %catalog_path.display(),
            data_dir = %data_dir.display(),
            products = catalog.len(),
            "Opened storefront data"
        );

        let events = EventBus::new();
        Ok(Self {
            catalog,
            cart: CartStore::new(storage.clone(), events.clone()),
            recent: RecentlyViewedStore::new(storage, events),
            shipping: config.shipping,
        })
    }
}
