//! Integration tests for store change notifications.
//!
//! Covers the event bus as seen by in-process subscribers and by clients of
//! the `/events` server-sent event stream.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::{body::Body, http::Request};
use futures::StreamExt;
use serde_json::json;
use tower::ServiceExt;

use bazaar_integration_tests::TestApp;
use bazaar_storefront::events::StoreEvent;

const WAIT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn test_http_mutations_notify_subscribers() {
    let app = TestApp::new();
    let mut cart_badge = app.state.events().subscribe().only(StoreEvent::CartUpdated);
    let mut recent_strip = app
        .state
        .events()
        .subscribe()
        .only(StoreEvent::RecentProductsUpdated);

    app.post("/cart/add", json!({"product_id": 1})).await;
    app.get("/products/hoodie/zip-hoodie").await;

    assert_eq!(cart_badge.try_recv(), Some(StoreEvent::CartUpdated));
    assert_eq!(cart_badge.try_recv(), None);
    assert_eq!(
        recent_strip.try_recv(),
        Some(StoreEvent::RecentProductsUpdated)
    );
}

#[tokio::test]
async fn test_failed_mutation_is_not_announced() {
    let app = TestApp::new();
    let mut sub = app.state.events().subscribe();

    app.post("/cart/remove", json!({"index": 0})).await;
    app.post("/cart/add", json!({"product_id": 3})).await;

    assert_eq!(sub.try_recv(), None);
}

#[tokio::test]
async fn test_dropped_subscription_stops_counting() {
    let app = TestApp::new();
    let sub = app.state.events().subscribe();
    assert_eq!(app.state.events().subscriber_count(), 1);

    drop(sub);
    assert_eq!(app.state.events().subscriber_count(), 0);

    // Nobody listening: the change still persists
    app.post("/cart/add", json!({"product_id": 1})).await;
    assert_eq!(app.get("/cart/count").await.body["count"], 1);
}

#[tokio::test]
async fn test_event_stream_delivers_named_events() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        response.headers()["content-type"],
        "text/event-stream"
    );
    let mut body = response.into_body().into_data_stream();

    app.post("/cart/add", json!({"product_id": 1})).await;

    let chunk = tokio::time::timeout(WAIT, body.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let text = String::from_utf8(chunk.to_vec()).unwrap();
    assert!(text.contains("event: cartUpdated"));
}

#[tokio::test]
async fn test_closing_event_stream_unsubscribes() {
    let app = TestApp::new();

    let response = app
        .router()
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(app.state.events().subscriber_count(), 1);

    drop(response);
    assert_eq!(app.state.events().subscriber_count(), 0);
}
