//! Home page.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use super::products::{SubcategoryView, subcategory_views};
use crate::error::Result;
use crate::models::RecentlyViewedEntry;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub recently_viewed: Vec<RecentlyViewedEntry>,
    pub categories: Vec<SubcategoryView>,
    pub product_count: usize,
}

/// Landing data: what the shopper looked at last and what is on offer.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    Ok(Json(HomeResponse {
        recently_viewed: state.recent().list()?,
        categories: subcategory_views(&state, None),
        product_count: state.catalog().len(),
    }))
}
