//! Change notifications and the subscriber list they are fanned out to.

use std::sync::Mutex;

use serde::Serialize;
use tracing::trace;

use super::state::{FocusedClient, TagState};

/// A change detected by a refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// Tag count, active tags or occupied tags changed.
    TagsChanged(TagState),
    /// The layout string changed.
    LayoutChanged { layout: String },
    /// The focused client changed, including to or from nothing focused.
    ClientChanged { client: Option<FocusedClient> },
}

/// Identifies a registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// A live registration: keep the receiver, pass the id to unsubscribe.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub events: flume::Receiver<BridgeEvent>,
}

/// Explicit observer list. Each subscriber gets its own unbounded channel.
#[derive(Debug, Default)]
pub struct EventBus {
    inner: Mutex<BusInner>,
}

#[derive(Debug, Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<(SubscriberId, flume::Sender<BridgeEvent>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = flume::unbounded();
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = SubscriberId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, tx));
        Subscription { id, events: rx }
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        inner.subscribers.len() != before
    }

    /// Deliver `event` to every subscriber, dropping those whose receiver is gone.
    pub fn emit(&self, event: BridgeEvent) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        trace!(?event, subscribers = inner.subscribers.len(), "Emitting");
        inner
            .subscribers
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .subscribers
            .len()
    }
}
