//! Domain models persisted by the storefront stores.
//!
//! These are the shapes written to storage. Catalog products live in
//! [`crate::catalog`]; the records here are denormalised copies taken at the
//! moment a product was added to the cart or viewed, so they survive catalog
//! changes.

pub mod account;
pub mod cart;
pub mod recent;

pub use account::{Account, CurrentUser};
pub use cart::CartItem;
pub use recent::RecentlyViewedEntry;
