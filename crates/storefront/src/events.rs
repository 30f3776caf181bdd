//! Change notifications for storefront state.
//!
//! Every store mutation publishes a [`StoreEvent`] on the shared [`EventBus`].
//! Anything that shows a copy of store state holds a [`Subscription`] and
//! re-reads the store when an event arrives; the event carries no payload.
//!
//! Subscriptions are RAII handles: dropping one unsubscribes it. Events
//! published while nobody is subscribed are dropped, since the stores remain
//! the source of truth and are re-read on the next subscribe.

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Buffered events per subscriber before older ones are skipped.
const CHANNEL_CAPACITY: usize = 64;

/// A store changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StoreEvent {
    /// The cart was modified.
    #[serde(rename = "cartUpdated")]
    CartUpdated,
    /// The recently-viewed list was modified.
    #[serde(rename = "recentProductsUpdated")]
    RecentProductsUpdated,
}

impl StoreEvent {
    /// Wire name of the event, as used in SSE and `HX-Trigger` headers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CartUpdated => "cartUpdated",
            Self::RecentProductsUpdated => "recentProductsUpdated",
        }
    }
}

/// Process-wide publish/subscribe channel for store events.
///
/// Cheap to clone; all clones share one channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish `event` to every live subscription.
    ///
    /// Returns the number of subscriptions that will see it.
    pub fn publish(&self, event: StoreEvent) -> usize {
        if let Ok(count) = self.sender.send(event) {
            tracing::debug!(event = event.name(), subscribers = count, "Published store event");
            count
        } else {
            tracing::trace!(event = event.name(), "No subscribers for store event");
            0
        }
    }

    /// Start receiving events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            only: None,
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A live subscription to store events. Drop it to unsubscribe.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<StoreEvent>,
    only: Option<StoreEvent>,
}

impl Subscription {
    /// Restrict this subscription to a single event kind.
    #[must_use]
    pub const fn only(mut self, event: StoreEvent) -> Self {
        self.only = Some(event);
        self
    }

    fn wants(&self, event: StoreEvent) -> bool {
        self.only.is_none_or(|only| only == event)
    }

    /// Wait for the next matching event.
    ///
    /// Returns `None` once the bus has been dropped. If this subscriber fell
    /// behind and events were skipped, waiting simply continues; listeners
    /// re-read the store anyway, so nothing is lost.
    pub async fn recv(&mut self) -> Option<StoreEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.wants(event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Subscription lagged behind store events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next matching event that has already been published, if any.
    pub fn try_recv(&mut self) -> Option<StoreEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.wants(event) => return Some(event),
                Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_dropped() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(StoreEvent::CartUpdated), 0);

        // Subscribing later does not replay it
        let mut sub = bus.subscribe();
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn test_every_subscriber_receives_event() {
        let bus = EventBus::new();
        let mut header = bus.subscribe();
        let mut cart_page = bus.subscribe();

        assert_eq!(bus.publish(StoreEvent::CartUpdated), 2);
        assert_eq!(header.try_recv(), Some(StoreEvent::CartUpdated));
        assert_eq!(cart_page.try_recv(), Some(StoreEvent::CartUpdated));
        assert_eq!(header.try_recv(), None);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        let sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(StoreEvent::RecentProductsUpdated), 0);
    }

    #[test]
    fn test_only_filters_other_events() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe().only(StoreEvent::RecentProductsUpdated);

        bus.publish(StoreEvent::CartUpdated);
        bus.publish(StoreEvent::RecentProductsUpdated);

        assert_eq!(sub.try_recv(), Some(StoreEvent::RecentProductsUpdated));
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_bus_dropped() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe();
        drop(bus);
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn test_recv_waits_for_event() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe();

        let publisher = bus.clone();
        tokio::spawn(async move {
            publisher.publish(StoreEvent::CartUpdated);
        });

        assert_eq!(sub.recv().await, Some(StoreEvent::CartUpdated));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(StoreEvent::CartUpdated.name(), "cartUpdated");
        assert_eq!(
            StoreEvent::RecentProductsUpdated.name(),
            "recentProductsUpdated"
        );
    }
}
