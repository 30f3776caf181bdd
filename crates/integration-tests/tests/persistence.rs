//! Integration tests for file-backed state.
//!
//! A storefront pointed at a data directory must pick up where the previous
//! process left off.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use bazaar_integration_tests::CATALOG;
use bazaar_storefront::catalog::Catalog;
use bazaar_storefront::config::StorefrontConfig;
use bazaar_storefront::state::AppState;
use bazaar_storefront::storage::{FileStore, KeyValueStore, keys};

fn config(dir: &std::path::Path) -> StorefrontConfig {
    let catalog_path = dir.join("data.json");
    std::fs::write(&catalog_path, CATALOG).unwrap();
    StorefrontConfig {
        catalog_path,
        data_dir: Some(dir.join("state")),
        ..StorefrontConfig::default()
    }
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first = AppState::from_config(config(dir.path())).unwrap();
    assert_eq!(first.catalog().len(), 5);
    let product = first.catalog().find_by_slug("zip-hoodie").unwrap().clone();
    first
        .cart()
        .add(&product, 2, Some(bazaar_core::Size::XL))
        .unwrap();
    first.recent().record_product(&product).unwrap();
    drop(first);

    let second = AppState::from_config(config(dir.path())).unwrap();
    let items = second.cart().items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(second.recent().list().unwrap()[0].slug, "zip-hoodie");
}

#[tokio::test]
async fn test_corrupt_state_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());

    let store = FileStore::open(dir.path().join("state")).unwrap();
    store.set(keys::CART, "{ not json").unwrap();

    let state = AppState::from_config(config).unwrap();
    assert!(state.cart().items().unwrap().is_empty());

    let app = bazaar_storefront::app(state);
    let response = tower::ServiceExt::oneshot(
        app,
        axum::http::Request::builder()
            .uri("/cart/count")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_catalog_serves_empty_listing() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorefrontConfig {
        catalog_path: dir.path().join("missing.json"),
        ..StorefrontConfig::default()
    };

    let state = AppState::from_config(config).unwrap();
    assert!(state.catalog().is_empty());
    assert_eq!(state.catalog().listing(&Default::default()).total_items, 0);
}

#[test]
fn test_shared_storage_between_stores() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    let catalog = Catalog::from_json(CATALOG).unwrap();

    let state = AppState::new(StorefrontConfig::default(), catalog, Arc::clone(&storage));
    let product = state.catalog().find_by_slug("spor-corap").unwrap().clone();
    state.cart().add(&product, 1, None).unwrap();

    let raw = storage.get(keys::CART).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["id"], json!(4));
    assert_eq!(stored[0]["quantity"], json!(1));
}
