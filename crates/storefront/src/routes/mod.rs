//! HTTP route handlers for storefront.
//!
//! All responses are JSON. Mutations that change a store answer with an
//! `HX-Trigger` header naming the store event, so an HTMX front end can
//! refresh dependent fragments.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                          - Home: recently viewed + category counts
//! GET    /health                    - Health check
//!
//! # Products
//! GET    /products                  - Listing (?category=&q=&page=)
//! GET    /products/{category}/{slug} - Product detail (records a view)
//! GET    /search                    - Header search (?q=)
//!
//! # Cart
//! GET    /cart                      - Cart with checkout summary
//! GET    /cart/count                - Cart item count badge
//! POST   /cart/add                  - Add product, `quick` skips sizes (triggers cartUpdated)
//! POST   /cart/increase             - Increase line quantity
//! POST   /cart/decrease             - Decrease line quantity (floor 1)
//! POST   /cart/remove               - Remove line
//! POST   /cart/clear                - Empty the cart
//!
//! # Recently viewed
//! GET    /recent                    - Recently viewed products
//! DELETE /recent                    - Clear (triggers recentProductsUpdated)
//!
//! # Account
//! GET    /account                   - Current session
//! POST   /account/register          - Register and sign in
//! POST   /account/login             - Sign in
//! POST   /account/logout            - Sign out
//!
//! # Events
//! GET    /events                    - Server-sent store events
//! ```

pub mod account;
pub mod cart;
pub mod events;
pub mod home;
pub mod products;
pub mod recent;
pub mod search;

use axum::{
    Router,
    http::Uri,
    response::AppendHeaders,
    routing::{get, post},
};

use crate::error::AppError;
use crate::events::StoreEvent;
use crate::state::AppState;

/// Header carrying the store event a mutation fired.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// `HX-Trigger` header for `event`.
pub(crate) const fn trigger(
    event: StoreEvent,
) -> AppendHeaders<[(&'static str, &'static str); 1]> {
    AppendHeaders([(HX_TRIGGER, event.name())])
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{category}/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show))
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/logout", post(account::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        .route("/search", get(search::search))
        // Cart routes
        .nest("/cart", cart_routes())
        // Recently viewed
        .route("/recent", get(recent::list).delete(recent::clear))
        // Account routes
        .nest("/account", account_routes())
        // Store event stream
        .route("/events", get(events::stream))
        .fallback(not_found)
}

/// Fallback for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
