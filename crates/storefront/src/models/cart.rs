//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bazaar_core::{CurrencyCode, Price, ProductId, Size};

use crate::catalog::Product;

const fn default_quantity() -> u32 {
    1
}

/// One line in the cart: a product, a quantity and an optional size.
///
/// Lines are identified by `(id, selected_size)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Always at least 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, rename = "selectedSize")]
    pub selected_size: Option<Size>,
}

impl CartItem {
    /// Snapshot a catalog product as a cart line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32, selected_size: Option<Size>) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.amount,
            currency: product.price.currency_code.clone(),
            image_urls: product.image_urls.clone(),
            category: product.category.clone(),
            quantity: quantity.max(1),
            selected_size,
        }
    }

    /// Whether this line holds `id` in `size`.
    #[must_use]
    pub fn is_line_for(&self, id: ProductId, size: Option<Size>) -> bool {
        self.id == id && self.selected_size == size
    }

    /// Unit price.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::new(self.price, self.currency.clone())
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults_quantity_and_size() {
        let item: CartItem =
            serde_json::from_str(r#"{"id": 5, "name": "Bere", "price": 120}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.selected_size, None);
        assert_eq!(item.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_selected_size_uses_camel_case_key() {
        let item: CartItem = serde_json::from_str(
            r#"{"id": 5, "name": "Hoodie", "price": 120, "quantity": 2, "selectedSize": "M"}"#,
        )
        .unwrap();
        assert_eq!(item.selected_size, Some(Size::M));

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["selectedSize"], "M");
    }

    #[test]
    fn test_line_total() {
        let item = CartItem {
            id: ProductId::new(1),
            name: "Hoodie".to_string(),
            price: Decimal::new(1050, 2),
            currency: CurrencyCode::TRY,
            image_urls: Vec::new(),
            category: "hoodie".to_string(),
            quantity: 3,
            selected_size: Some(Size::L),
        };
        assert_eq!(item.line_total().amount, Decimal::new(3150, 2));
        assert!(item.is_line_for(ProductId::new(1), Some(Size::L)));
        assert!(!item.is_line_for(ProductId::new(1), None));
    }
}
