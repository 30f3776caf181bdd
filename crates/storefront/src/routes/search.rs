//! Header search.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::products::ProductView;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ProductView>,
}

/// Match products by name or category.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let results = state
        .catalog()
        .search(&query.q)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Json(SearchResponse {
        query: query.q,
        results,
    })
}
