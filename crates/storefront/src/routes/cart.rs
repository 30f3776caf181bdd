//! Cart route handlers.
//!
//! Every mutation answers with the updated cart summary and an `HX-Trigger:
//! cartUpdated` header. Decreasing a line already at quantity 1 changes
//! nothing, so that response carries no trigger.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bazaar_core::{ProductId, Size};

use super::trigger;
use crate::error::{AppError, Result};
use crate::events::StoreEvent;
use crate::models::CartItem;
use crate::services::CartSummary;
use crate::state::AppState;

/// Add to cart request.
///
/// `quick` marks an add from a listing card: no size is asked for and any
/// `size` sent along is ignored.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub quantity: Option<u32>,
    pub size: Option<String>,
    #[serde(default)]
    pub quick: bool,
}

/// Request addressing one cart line by position.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub index: usize,
}

/// Cart line with formatted prices.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub index: usize,
    #[serde(flatten)]
    pub item: CartItem,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart page response.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub free_shipping: bool,
    pub remaining_for_free_shipping: Option<String>,
}

impl From<CartSummary> for CartView {
    fn from(summary: CartSummary) -> Self {
        let lines = summary
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| CartLineView {
                index,
                unit_price: item.unit_price().display(),
                line_total: item.line_total().display(),
                item,
            })
            .collect();

        Self {
            lines,
            item_count: summary.item_count,
            subtotal: summary.subtotal.display(),
            shipping: summary.shipping.display(),
            total: summary.total.display(),
            free_shipping: summary.free_shipping,
            remaining_for_free_shipping: summary
                .remaining_for_free_shipping
                .map(|price| price.display()),
        }
    }
}

/// Cart count badge response.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

fn cart_view(state: &AppState) -> Result<CartView> {
    Ok(state.cart().summary(&state.config().shipping)?.into())
}

fn updated(state: &AppState) -> Result<Response> {
    Ok((trigger(StoreEvent::CartUpdated), Json(cart_view(state)?)).into_response())
}

/// Display the cart with its checkout summary.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    Ok(Json(cart_view(&state)?))
}

/// Get cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Json<CartCount>> {
    Ok(Json(CartCount {
        count: state.cart().item_count()?,
    }))
}

/// Add a catalog product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find_by_id(ProductId::new(form.product_id))
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let quantity = form.quantity.unwrap_or(1);

    if form.quick {
        state.cart().quick_add(product, quantity)?;
        return updated(&state);
    }

    let size = form
        .size
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<Size>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    state.cart().add(product, quantity, size)?;
    updated(&state)
}

/// Increase a line's quantity by one.
#[instrument(skip(state))]
pub async fn increase(
    State(state): State<AppState>,
    Json(form): Json<LineForm>,
) -> Result<Response> {
    state.cart().increase(form.index)?;
    updated(&state)
}

/// Decrease a line's quantity by one, stopping at 1.
#[instrument(skip(state))]
pub async fn decrease(
    State(state): State<AppState>,
    Json(form): Json<LineForm>,
) -> Result<Response> {
    if state.cart().decrease(form.index)?.changed {
        return updated(&state);
    }
    Ok(Json(cart_view(&state)?).into_response())
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<LineForm>,
) -> Result<Response> {
    state.cart().remove(form.index)?;
    updated(&state)
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Response> {
    state.cart().clear()?;
    updated(&state)
}
