//! Cart store.
//!
//! The cart is a single JSON list under [`keys::CART`]. Every mutation reads
//! the whole list, changes a copy, writes the whole list back and publishes
//! [`StoreEvent::CartUpdated`]. A per-store mutex makes each call atomic
//! within the process; separate processes sharing the storage are last-write-wins.

mod error;

pub use error::CartError;

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde::Serialize;

use bazaar_core::{CurrencyCode, Price, Size};

use crate::catalog::Product;
use crate::events::{EventBus, StoreEvent};
use crate::models::CartItem;
use crate::storage::{KeyValueStore, StorageError, keys, read_list, write_json};

/// Shipping pricing applied to the cart summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingRules {
    /// Subtotal at or above which shipping is free.
    pub free_threshold: Decimal,
    /// Flat fee below the threshold.
    pub fee: Decimal,
    /// Currency summary amounts are reported in.
    pub currency: CurrencyCode,
}

impl Default for ShippingRules {
    fn default() -> Self {
        Self {
            free_threshold: Decimal::new(1500, 0),
            fee: Decimal::new(2999, 2),
            currency: CurrencyCode::TRY,
        }
    }
}

/// Checkout summary for the cart page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    pub free_shipping: bool,
    /// How much more to spend for free shipping, when not yet reached.
    pub remaining_for_free_shipping: Option<Price>,
}

impl CartSummary {
    /// Summarise `items` under `rules`.
    ///
    /// An empty cart has no shipping charge.
    #[must_use]
    pub fn new(items: Vec<CartItem>, rules: &ShippingRules) -> Self {
        let subtotal = cart_total(&items);
        let free_shipping = subtotal >= rules.free_threshold;
        let shipping = if free_shipping || items.is_empty() {
            Decimal::ZERO
        } else {
            rules.fee
        };
        let price = |amount| Price::new(amount, rules.currency.clone());

        Self {
            item_count: item_count(&items),
            subtotal: price(subtotal),
            shipping: price(shipping),
            total: price(subtotal.saturating_add(shipping)),
            free_shipping,
            remaining_for_free_shipping: (!free_shipping)
                .then(|| price(rules.free_threshold.saturating_sub(subtotal))),
            items,
        }
    }
}

/// Sum of price × quantity over all lines.
///
/// Saturates at the `Decimal` bounds instead of overflowing.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items.iter().fold(Decimal::ZERO, |total, item| {
        total.saturating_add(item.price.saturating_mul(Decimal::from(item.quantity)))
    })
}

/// Sum of quantities over all lines.
#[must_use]
pub fn item_count(items: &[CartItem]) -> u32 {
    items
        .iter()
        .fold(0_u32, |count, item| count.saturating_add(item.quantity))
}

/// Cart contents after a mutation that may have been a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
    pub items: Vec<CartItem>,
    /// Whether the cart was written and `cartUpdated` published.
    pub changed: bool,
}

/// Persistent shopping cart.
///
/// Cheap to clone; clones share storage, lock and event bus.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    events: EventBus,
    lock: Arc<Mutex<()>>,
}

impl CartStore {
    /// Create a cart store over `storage`, publishing on `events`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, events: EventBus) -> Self {
        Self {
            storage,
            events,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current cart lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the storage backend fails.
    pub fn items(&self) -> Result<Vec<CartItem>, CartError> {
        self.load()
    }

    /// Add `quantity` of `product` from the product detail page, merging into
    /// an existing line with the same size.
    ///
    /// Products sold by size need `size`; other products ignore it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a zero quantity,
    /// `CartError::SizeRequired` when a sized product has no size, or
    /// `CartError::Storage` if persistence fails.
    pub fn add(
        &self,
        product: &Product,
        quantity: u32,
        size: Option<Size>,
    ) -> Result<Vec<CartItem>, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let size = if product.requires_size() {
            Some(size.ok_or_else(|| CartError::SizeRequired(product.name.clone()))?)
        } else {
            None
        };
        self.add_line(product, quantity, size)
    }

    /// Add `quantity` of `product` straight from a listing card.
    ///
    /// No size is asked for, even for sized products; the line merges with
    /// other size-less lines of the same product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a zero quantity or
    /// `CartError::Storage` if persistence fails.
    pub fn quick_add(&self, product: &Product, quantity: u32) -> Result<Vec<CartItem>, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        self.add_line(product, quantity, None)
    }

    fn add_line(
        &self,
        product: &Product,
        quantity: u32,
        size: Option<Size>,
    ) -> Result<Vec<CartItem>, CartError> {
        self.mutate(|items| {
            if let Some(line) = items.iter_mut().find(|l| l.is_line_for(product.id, size)) {
                line.quantity = line.quantity.saturating_add(quantity);
            } else {
                items.push(CartItem::from_product(product, quantity, size));
            }
            tracing::info!(product_id = %product.id, quantity, ?size, "Added to cart");
            Ok(true)
        })
        .map(|update| update.items)
    }

    /// Increase the quantity of the line at `index` by one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` for a bad index or
    /// `CartError::Storage` if persistence fails.
    pub fn increase(&self, index: usize) -> Result<Vec<CartItem>, CartError> {
        self.mutate(|items| {
            let line = items.get_mut(index).ok_or(CartError::LineNotFound(index))?;
            line.quantity = line.quantity.saturating_add(1);
            Ok(true)
        })
        .map(|update| update.items)
    }

    /// Decrease the quantity of the line at `index` by one, stopping at 1.
    ///
    /// At quantity 1 nothing is written, no event is published and the
    /// returned update reports `changed: false`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` for a bad index or
    /// `CartError::Storage` if persistence fails.
    pub fn decrease(&self, index: usize) -> Result<CartUpdate, CartError> {
        self.mutate(|items| {
            let line = items.get_mut(index).ok_or(CartError::LineNotFound(index))?;
            if line.quantity <= 1 {
                return Ok(false);
            }
            line.quantity -= 1;
            Ok(true)
        })
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` for a bad index or
    /// `CartError::Storage` if persistence fails.
    pub fn remove(&self, index: usize) -> Result<Vec<CartItem>, CartError> {
        self.mutate(|items| {
            if index >= items.len() {
                return Err(CartError::LineNotFound(index));
            }
            let removed = items.remove(index);
            tracing::info!(product_id = %removed.id, "Removed from cart");
            Ok(true)
        })
        .map(|update| update.items)
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if persistence fails.
    pub fn clear(&self) -> Result<(), CartError> {
        self.mutate(|items| {
            items.clear();
            Ok(true)
        })?;
        Ok(())
    }

    /// Sum of price × quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the storage backend fails.
    pub fn total(&self) -> Result<Decimal, CartError> {
        Ok(cart_total(&self.load()?))
    }

    /// Sum of quantities.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the storage backend fails.
    pub fn item_count(&self) -> Result<u32, CartError> {
        Ok(item_count(&self.load()?))
    }

    /// Checkout summary under `rules`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the storage backend fails.
    pub fn summary(&self, rules: &ShippingRules) -> Result<CartSummary, CartError> {
        Ok(CartSummary::new(self.load()?, rules))
    }

    fn load(&self) -> Result<Vec<CartItem>, CartError> {
        let mut items: Vec<CartItem> = read_list(self.storage.as_ref(), keys::CART)?;
        for item in &mut items {
            item.quantity = item.quantity.max(1);
        }
        Ok(items)
    }

    /// Read-modify-write under the store lock. `apply` returns whether it
    /// changed anything; unchanged carts are neither written nor announced.
    fn mutate<F>(&self, apply: F) -> Result<CartUpdate, CartError>
    where
        F: FnOnce(&mut Vec<CartItem>) -> Result<bool, CartError>,
    {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;

        let mut items = self.load()?;
        let changed = apply(&mut items)?;
        if changed {
            write_json(self.storage.as_ref(), keys::CART, &items)?;
            self.events.publish(StoreEvent::CartUpdated);
        }
        Ok(CartUpdate { items, changed })
    }
}
