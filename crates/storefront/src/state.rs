//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::events::EventBus;
use crate::services::{AccountService, CartStore, RecentlyViewedStore};
use crate::storage::{KeyValueStore, StorageError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the stores and the event bus they publish on.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    events: EventBus,
    cart: CartStore,
    recent: RecentlyViewedStore,
    accounts: AccountService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Loaded product catalog
    /// * `storage` - Backend for cart, recently viewed and account state
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let events = EventBus::new();
        let cart = CartStore::new(Arc::clone(&storage), events.clone());
        let recent = RecentlyViewedStore::new(Arc::clone(&storage), events.clone());
        let accounts = AccountService::new(storage);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                events,
                cart,
                recent,
                accounts,
            }),
        }
    }

    /// Load the catalog and open storage as configured.
    ///
    /// A catalog that fails to load is logged and replaced by an empty one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the configured data directory cannot be opened.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StorageError> {
        let catalog = Catalog::load_or_empty(&config.catalog_path);
        let storage = config.storage()?;
        Ok(Self::new(config, catalog, storage))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the store event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the recently viewed store.
    #[must_use]
    pub fn recent(&self) -> &RecentlyViewedStore {
        &self.inner.recent
    }

    /// Get a reference to the account service.
    #[must_use]
    pub fn accounts(&self) -> &AccountService {
        &self.inner.accounts
    }
}
