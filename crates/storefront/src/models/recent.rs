//! Recently viewed products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bazaar_core::{CurrencyCode, ProductId};

use crate::catalog::Product;

/// A product the shopper looked at, as shown in the "recently viewed" strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentlyViewedEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub image: String,
    #[serde(default)]
    pub category: String,
    pub slug: String,
}

impl From<&Product> for RecentlyViewedEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.amount,
            currency: product.price.currency_code.clone(),
            image: product.primary_image().to_string(),
            category: product.category.clone(),
            slug: product.slug.clone(),
        }
    }
}
