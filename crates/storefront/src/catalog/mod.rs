//! Static product catalog.
//!
//! The catalog is a JSON document loaded once at startup and then shared
//! read-only. Loading normalises every record into [`Product`]; see
//! [`document`] for the accepted input shapes.
//!
//! A catalog that cannot be read or parsed is logged and replaced by an empty
//! one, so the storefront still starts and simply lists no products.

mod document;
mod listing;

pub use listing::{ListingQuery, PRODUCTS_PER_PAGE, Page, SUBCATEGORIES, Subcategory};

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use bazaar_core::{Price, ProductId, StockStatus, requires_size};

use document::RawDocument;

/// Image shown when a product has none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.jpg";

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A catalog product in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// URL slug derived from the name.
    pub slug: String,
    pub price: Price,
    /// Category label as written in the catalog.
    pub category: String,
    /// Category label normalised for URLs.
    pub category_slug: String,
    pub image_urls: Vec<String>,
    pub stock_status: StockStatus,
    pub description: Option<String>,
}

impl Product {
    /// First image, or the placeholder.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.image_urls
            .first()
            .map_or(PLACEHOLDER_IMAGE, String::as_str)
    }

    /// Whether a size must be chosen before adding this product to the cart.
    #[must_use]
    pub fn requires_size(&self) -> bool {
        requires_size(&self.category)
    }

    /// Storefront path of the product detail page.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/products/{}/{}", self.category_slug, self.slug)
    }
}

/// The loaded product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// A catalog with no products.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-normalised products.
    #[must_use]
    pub const fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog document.
    ///
    /// Products are ordered by category key, then by their order in the file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the document is not a valid catalog.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: RawDocument = serde_json::from_str(json)?;
        let products = document
            .into_groups()
            .into_iter()
            .flat_map(|(group, records)| {
                records
                    .into_iter()
                    .map(move |record| record.normalize(&group))
            })
            .collect();
        Ok(Self { products })
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load a catalog file, falling back to an empty catalog on any error.
    #[must_use]
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!(
                    path = %path.display(),
                    products = catalog.len(),
                    "Catalog loaded"
                );
                catalog
            }
            Err(e) => {
                tracing::error!(error = %e, "Catalog could not be loaded, serving no products");
                Self::empty()
            }
        }
    }

    /// All products.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look a product up by id.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look a product up by its name slug, searching every category.
    ///
    /// If two products share a slug the first one in catalog order wins.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Number of products per lowercased category label.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for product in &self.products {
            *counts.entry(product.category.to_lowercase()).or_insert(0) += 1;
        }
        counts
    }
}
