//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use bazaar_core::Size;

use crate::catalog::{ListingQuery, Page, Product, SUBCATEGORIES};
use crate::error::{AppError, Result};
use crate::models::RecentlyViewedEntry;
use crate::state::AppState;

/// Product display data for listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub category: String,
    /// Formatted price, e.g. `₺ 749.99`.
    pub price: String,
    pub amount: rust_decimal::Decimal,
    pub currency: String,
    pub image: String,
    pub path: String,
    pub in_stock: bool,
    pub requires_size: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            amount: product.price.amount,
            currency: product.price.currency_code.to_string(),
            image: product.primary_image().to_string(),
            path: product.path(),
            in_stock: product.stock_status.is_available(),
            requires_size: product.requires_size(),
        }
    }
}

/// Sidebar entry with its product count.
#[derive(Debug, Clone, Serialize)]
pub struct SubcategoryView {
    pub label: &'static str,
    pub slug: &'static str,
    pub count: usize,
    pub selected: bool,
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub subcategories: Vec<SubcategoryView>,
    pub query: Option<String>,
    pub products: Page<ProductView>,
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: ProductView,
    pub image_urls: Vec<String>,
    pub description: Option<String>,
    /// Sizes to choose from; empty for products sold without a size.
    pub sizes: Vec<Size>,
    pub recently_viewed: Vec<RecentlyViewedEntry>,
}

/// Sidebar subcategories with counts, marking `selected`.
pub(crate) fn subcategory_views(state: &AppState, selected: Option<&str>) -> Vec<SubcategoryView> {
    let counts = state.catalog().category_counts();
    let selected = selected.map(str::to_lowercase);

    SUBCATEGORIES
        .iter()
        .map(|sub| SubcategoryView {
            label: sub.label,
            slug: sub.slug,
            count: counts.get(sub.count_key).copied().unwrap_or(0),
            selected: selected.as_deref() == Some(sub.slug),
        })
        .collect()
}

/// Display a page of products.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Json<ListingResponse> {
    let page = state.catalog().listing(&query);
    let products = Page {
        items: page.items.iter().map(ProductView::from).collect(),
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
    };

    Json(ListingResponse {
        subcategories: subcategory_views(&state, query.category.as_deref()),
        query: query.q,
        products,
    })
}

/// Display a product and record the view.
///
/// Products are looked up by slug; the category segment is only cosmetic.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((_category, slug)): Path<(String, String)>,
) -> Result<Json<ProductDetail>> {
    let product = state
        .catalog()
        .find_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let recently_viewed = state.recent().record_product(product)?;
    crate::error::add_breadcrumb(
        "navigation",
        "Viewed product",
        &[("product_id", &product.id.to_string())],
    );

    let sizes = if product.requires_size() {
        Size::ALL.to_vec()
    } else {
        Vec::new()
    };

    Ok(Json(ProductDetail {
        product: ProductView::from(product),
        image_urls: product.image_urls.clone(),
        description: product.description.clone(),
        sizes,
        recently_viewed,
    }))
}
