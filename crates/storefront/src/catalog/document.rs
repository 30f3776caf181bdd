//! Raw catalog document shape and normalisation into [`Product`].
//!
//! Catalog files are hand-maintained and inconsistent: the category lives in
//! `category`, `kategori` or `type`; images come as `image_urls` or a single
//! `image`; currency is sometimes a bare symbol or missing. Everything is
//! folded into one canonical record here so nothing downstream has to care.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use bazaar_core::{CurrencyCode, Price, ProductId, StockStatus, category_slug, slugify};

use super::Product;

/// Top-level catalog document.
///
/// Accepts both `{ "products": { "<category>": [...] } }` and the bare
/// category map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawDocument {
    Wrapped {
        products: BTreeMap<String, Vec<RawProduct>>,
    },
    Bare(BTreeMap<String, Vec<RawProduct>>),
}

impl RawDocument {
    pub(super) fn into_groups(self) -> BTreeMap<String, Vec<RawProduct>> {
        match self {
            Self::Wrapped { products } | Self::Bare(products) => products,
        }
    }
}

/// A product record exactly as it appears in the file.
#[derive(Debug, Deserialize)]
pub(super) struct RawProduct {
    id: ProductId,
    name: String,
    price: Decimal,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    kategori: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    image_urls: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default, alias = "stock", alias = "in_stock")]
    stock_status: Option<StockStatus>,
    #[serde(default)]
    description: Option<String>,
}

impl RawProduct {
    /// Normalise into a canonical product. `group` is the category key the
    /// record was listed under, used when the record names no category.
    pub(super) fn normalize(self, group: &str) -> Product {
        let category = [self.category, self.kategori, self.kind]
            .into_iter()
            .flatten()
            .find(|c| !c.trim().is_empty())
            .unwrap_or_else(|| group.to_string());

        let mut image_urls = self.image_urls;
        image_urls.retain(|url| !url.trim().is_empty());
        if image_urls.is_empty()
            && let Some(image) = self.image.filter(|url| !url.trim().is_empty())
        {
            image_urls.push(image);
        }

        let currency = self
            .currency
            .as_deref()
            .map(CurrencyCode::parse)
            .unwrap_or_default();

        Product {
            id: self.id,
            slug: slugify(&self.name),
            name: self.name,
            price: Price::new(self.price, currency),
            category_slug: category_slug(&category),
            category,
            image_urls,
            stock_status: self.stock_status.unwrap_or_default(),
            description: self.description.filter(|d| !d.trim().is_empty()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawProduct {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_category_prefers_english_field() {
        let product = raw(
            r#"{"id":1,"name":"A","price":10,"category":"hoodie","kategori":"bere"}"#,
        )
        .normalize("group");
        assert_eq!(product.category, "hoodie");
    }

    #[test]
    fn test_category_falls_back_to_kategori_then_type_then_group() {
        let p = raw(r#"{"id":1,"name":"A","price":10,"kategori":"Sac_Bandi"}"#).normalize("g");
        assert_eq!(p.category, "Sac_Bandi");
        assert_eq!(p.category_slug, "sac-bandi");

        let p = raw(r#"{"id":1,"name":"A","price":10,"type":"corap"}"#).normalize("g");
        assert_eq!(p.category, "corap");

        let p = raw(r#"{"id":1,"name":"A","price":10,"category":"  "}"#).normalize("bere");
        assert_eq!(p.category, "bere");
    }

    #[test]
    fn test_single_image_becomes_list() {
        let p = raw(r#"{"id":1,"name":"A","price":10,"image":"/a.jpg"}"#).normalize("g");
        assert_eq!(p.image_urls, vec!["/a.jpg".to_string()]);
    }

    #[test]
    fn test_missing_currency_defaults_to_dollar() {
        let p = raw(r#"{"id":1,"name":"A","price":10}"#).normalize("g");
        assert_eq!(p.price.currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_fractional_price_is_exact() {
        let p = raw(r#"{"id":1,"name":"A","price":749.99,"currency":"TRY"}"#).normalize("g");
        assert_eq!(p.price.amount, Decimal::new(74999, 2));
        assert_eq!(p.price.currency_code, CurrencyCode::TRY);
    }

    #[test]
    fn test_slug_derived_from_name() {
        let p = raw(r#"{"id":1,"name":"Gold Series Bere","price":10}"#).normalize("g");
        assert_eq!(p.slug, "gold-series-bere");
    }

    #[test]
    fn test_stock_alias() {
        let p = raw(r#"{"id":1,"name":"A","price":10,"stock":"out_of_stock"}"#).normalize("g");
        assert_eq!(p.stock_status, StockStatus::OutOfStock);
    }
}
