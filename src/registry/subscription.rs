//! Subscription handles

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio_util::sync::{CancellationToken, DropGuard};

use super::endpoint::SubscriberId;
use super::topic::TopicKind;
use crate::dispatcher::EventEnvelope;

/// Read side of one subscriber endpoint
///
/// Dropping the handle (or cancelling the token it was subscribed with)
/// removes the endpoint from the registry. Once the endpoint is removed
/// or the registry shuts down, [`recv`](Self::recv) drains what is left
/// and then returns `None`.
pub struct Subscription {
    id: SubscriberId,
    topic: TopicKind,
    rx: mpsc::Receiver<EventEnvelope>,
    dropped: Arc<AtomicU64>,
    cancel: CancellationToken,
    _guard: DropGuard,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriberId,
        topic: TopicKind,
        rx: mpsc::Receiver<EventEnvelope>,
        dropped: Arc<AtomicU64>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            id,
            topic,
            rx,
            dropped,
            _guard: cancel.clone().drop_guard(),
            cancel,
        }
    }

    /// Wait for the next envelope; `None` once the endpoint is closed
    pub async fn recv(&mut self) -> Option<EventEnvelope> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Result<EventEnvelope, TryRecvError> {
        self.rx.try_recv()
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn topic(&self) -> TopicKind {
        self.topic
    }

    /// Envelopes discarded because this subscriber's queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Ask the registry to remove this endpoint
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that fires when this subscription is cancelled
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .field("dropped", &self.dropped())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
