//! Account route handlers.
//!
//! Validation failures answer with the inline form message in the error body.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::models::CurrentUser;
use crate::services::{LoginForm, RegisterForm};
use crate::state::AppState;

/// Current session response.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub logged_in: bool,
    pub user: Option<CurrentUser>,
}

/// Who is signed in, if anyone.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<SessionView>> {
    let accounts = state.accounts();
    Ok(Json(SessionView {
        logged_in: accounts.is_logged_in()?,
        user: accounts.current_user()?,
    }))
}

/// Register a new account and sign it in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<Response> {
    let user = state.accounts().register(form)?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

/// Sign in with email and password.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<CurrentUser>> {
    Ok(Json(state.accounts().login(&form)?))
}

/// Sign out.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode> {
    state.accounts().logout()?;
    Ok(StatusCode::NO_CONTENT)
}
