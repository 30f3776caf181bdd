//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_api` - HTTP routes driven through the full router
//! - `store_events` - Server-sent events and cross-store notifications
//! - `persistence` - File-backed state surviving a restart
//!
//! [`TestApp`] builds the real application around an in-memory store and a
//! small fixture catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use bazaar_storefront::catalog::Catalog;
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::state::AppState;
use bazaar_storefront::storage::{KeyValueStore, MemoryStore};

/// Fixture catalog covering sized, unsized and sold-out products.
pub const CATALOG: &str = r#"{
    "products": {
        "bere": [
            {"id": 1, "name": "Gold Series Bere", "price": 249.90, "currency": "TRY",
             "category": "bere", "image_urls": ["/img/bere.jpg"]},
            {"id": 5, "name": "Gold Series Cap", "price": 199, "currency": "TRY",
             "category": "gold-series"}
        ],
        "hoodie": [
            {"id": 3, "name": "Zip Hoodie", "price": 999, "currency": "TRY",
             "category": "hoodie", "image_urls": ["/img/zip.jpg"]},
            {"id": 2, "name": "Oversize Hoodie", "price": 899, "currency": "TRY",
             "kategori": "hoodie"}
        ],
        "corap": [
            {"id": 4, "name": "Spor Corap", "price": 79.5, "currency": "TRY",
             "type": "corap", "stock": "sold out"}
        ]
    }
}"#;

/// A response with its JSON body decoded.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Value of the `HX-Trigger` header, if any.
    #[must_use]
    pub fn trigger(&self) -> Option<&str> {
        self.headers
            .get("HX-Trigger")
            .and_then(|value| value.to_str().ok())
    }
}

/// The storefront application over in-memory state.
pub struct TestApp {
    pub state: AppState,
    pub storage: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    /// Build the app with the fixture catalog and default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the fixture catalog does not parse.
    #[must_use]
    pub fn new() -> Self {
        let catalog = Catalog::from_json(CATALOG).expect("fixture catalog parses");
        Self::with_catalog(catalog)
    }

    /// Build the app with an arbitrary catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let storage = Arc::new(MemoryStore::new());
        let shared: Arc<dyn KeyValueStore> = storage.clone();
        let state = AppState::new(StorefrontConfig::default(), catalog, shared);
        let router = bazaar_storefront::app(state.clone());
        Self {
            state,
            storage,
            router,
        }
    }

    /// A router handle sharing this app's state.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Send a request with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not valid JSON.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router()
            .oneshot(builder.body(body).expect("request builds"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    /// `POST uri` with a JSON body.
    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
