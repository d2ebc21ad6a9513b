//! Subscriber endpoints
//!
//! The write half of a subscription. Only the broadcast path writes into
//! it, and only the owning [`Subscription`](super::Subscription) reads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::dispatcher::EventEnvelope;

/// Registry-assigned subscriber identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SubscriberId(pub u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of offering one envelope to one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    Delivered,
    /// Queue full, envelope discarded for this subscriber
    Dropped,
    /// Reader is gone
    Closed,
}

pub(crate) struct Endpoint {
    pub(crate) id: SubscriberId,
    tx: mpsc::Sender<EventEnvelope>,
    dropped: Arc<AtomicU64>,
}

impl Endpoint {
    pub(crate) fn new(
        id: SubscriberId,
        tx: mpsc::Sender<EventEnvelope>,
        dropped: Arc<AtomicU64>,
    ) -> Self {
        Self { id, tx, dropped }
    }

    /// Non-blocking enqueue; never waits for the reader
    pub(crate) fn offer(&self, envelope: EventEnvelope) -> Delivery {
        match self.tx.try_send(envelope) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Delivery::Dropped
            }
            Err(TrySendError::Closed(_)) => Delivery::Closed,
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
