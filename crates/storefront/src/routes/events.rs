//! Server-sent store events.
//!
//! Each connection holds its own [`Subscription`](crate::events::Subscription);
//! closing the connection drops it and unsubscribes. Events are named after
//! the store event (`cartUpdated`, `recentProductsUpdated`) and carry no data
//! beyond the name, so clients re-fetch whatever they display.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
};
use futures::Stream;

use crate::state::AppState;

/// Stream store events to the client.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut subscription = state.events().subscribe();
    tracing::debug!(
        subscribers = state.events().subscriber_count(),
        "Event stream opened"
    );

    let events = async_stream::stream! {
        while let Some(event) = subscription.recv().await {
            yield Ok(Event::default().event(event.name()).data(event.name()));
        }
    };

    Sse::new(events).keep_alive(KeepAlive::default())
}
