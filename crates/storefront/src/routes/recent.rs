//! Recently viewed products.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use super::trigger;
use crate::error::Result;
use crate::events::StoreEvent;
use crate::models::RecentlyViewedEntry;
use crate::state::AppState;

/// Recently viewed products, most recent first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RecentlyViewedEntry>>> {
    Ok(Json(state.recent().list()?))
}

/// Forget every recently viewed product.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Response> {
    state.recent().clear()?;
    Ok((
        StatusCode::NO_CONTENT,
        trigger(StoreEvent::RecentProductsUpdated),
    )
        .into_response())
}
