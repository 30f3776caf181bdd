//! Storefront stores and services.
//!
//! # Services
//!
//! - `cart` - Persistent cart with totals and checkout summary
//! - `recent` - Recently viewed products (max 4, most recent first)
//! - `auth` - Registration, login and the current session
//!
//! Each service owns a handle to the shared [`KeyValueStore`](crate::storage::KeyValueStore)
//! and serialises its own read-modify-write cycles.

pub mod auth;
pub mod cart;
pub mod recent;

pub use auth::{AccountService, AuthError, LoginForm, RegisterForm};
pub use cart::{
    CartError, CartStore, CartSummary, CartUpdate, ShippingRules, cart_total, item_count,
};
pub use recent::{MAX_RECENTLY_VIEWED, RecentlyViewedStore};
