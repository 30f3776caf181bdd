//! Stock status for catalog products.

use serde::{Deserialize, Deserializer, Serialize};

/// Whether a product can currently be bought.
///
/// Catalog files are inconsistent about this field, so deserialization accepts
/// booleans as well as a handful of string spellings. Unknown strings count as
/// in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
}

impl StockStatus {
    /// Returns true if the product can be added to a cart.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::InStock)
    }

    fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "out_of_stock" | "outofstock" | "sold_out" | "unavailable" | "false" => {
                Self::OutOfStock
            }
            _ => Self::InStock,
        }
    }
}

impl<'de> Deserialize<'de> for StockStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Label(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Self::InStock,
            Raw::Flag(false) => Self::OutOfStock,
            Raw::Label(label) => Self::from_label(&label),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_spellings() {
        let parse = |json: &str| serde_json::from_str::<StockStatus>(json).unwrap();

        assert_eq!(parse("\"in_stock\""), StockStatus::InStock);
        assert_eq!(parse("\"Out of stock\""), StockStatus::OutOfStock);
        assert_eq!(parse("\"sold-out\""), StockStatus::OutOfStock);
        assert_eq!(parse("true"), StockStatus::InStock);
        assert_eq!(parse("false"), StockStatus::OutOfStock);
        assert_eq!(parse("\"preorder\""), StockStatus::InStock);
    }

    #[test]
    fn test_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&StockStatus::OutOfStock).unwrap(),
            "\"out_of_stock\""
        );
    }
}
