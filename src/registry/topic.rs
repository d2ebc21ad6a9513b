//! Topics and their subscriber sets

use serde::Serialize;
use tokio::sync::RwLock;

use super::endpoint::{Delivery, Endpoint, SubscriberId};
use crate::dispatcher::EventEnvelope;

/// One topic per domain message kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKind {
    Heartbeat,
    RawGps,
}

impl TopicKind {
    pub const ALL: [TopicKind; 2] = [TopicKind::Heartbeat, TopicKind::RawGps];

    pub fn as_str(self) -> &'static str {
        match self {
            TopicKind::Heartbeat => "heartbeat",
            TopicKind::RawGps => "raw_gps",
        }
    }
}

impl std::fmt::Display for TopicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-subscriber outcome counts of a single broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub dropped: usize,
    pub closed: usize,
}

/// Live subscriber set for one topic
///
/// Membership changes take the write lock; broadcasts take the read lock,
/// so a broadcast always iterates a consistent snapshot.
pub(crate) struct Topic {
    kind: TopicKind,
    endpoints: RwLock<Vec<Endpoint>>,
}

impl Topic {
    pub(crate) fn new(kind: TopicKind) -> Self {
        Self {
            kind,
            endpoints: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn endpoints(&self) -> &RwLock<Vec<Endpoint>> {
        &self.endpoints
    }

    /// Remove one endpoint, dropping its sender. `false` if already gone.
    pub(crate) async fn remove(&self, id: SubscriberId) -> bool {
        let mut endpoints = self.endpoints.write().await;

        match endpoints.iter().position(|ep| ep.id == id) {
            Some(index) => {
                endpoints.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Offer `envelope` to every current endpoint without waiting on any
    pub(crate) async fn broadcast(&self, envelope: &EventEnvelope) -> BroadcastReport {
        let endpoints = self.endpoints.read().await;
        let mut report = BroadcastReport::default();

        for endpoint in endpoints.iter() {
            match endpoint.offer(envelope.clone()) {
                Delivery::Delivered => report.delivered += 1,
                Delivery::Dropped => {
                    report.dropped += 1;
                    tracing::trace!(
                        topic = %self.kind,
                        subscriber = %endpoint.id,
                        "Subscriber queue full, envelope dropped"
                    );
                }
                Delivery::Closed => report.closed += 1,
            }
        }

        report
    }

    /// Remove endpoints whose reader has gone away
    pub(crate) async fn prune_closed(&self) -> usize {
        let mut endpoints = self.endpoints.write().await;
        let before = endpoints.len();
        endpoints.retain(|ep| !ep.is_closed());
        before - endpoints.len()
    }

    /// Remove every endpoint. Each sender is dropped exactly once.
    pub(crate) async fn close(&self) -> usize {
        let drained: Vec<Endpoint> = self.endpoints.write().await.drain(..).collect();
        drained.len()
    }

    pub(crate) async fn len(&self) -> usize {
        self.endpoints.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU64;
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use super::*;
    use crate::convert::{DomainMessage, Heartbeat};
    use crate::protocol::{HeartbeatFrame, SenderId};

    fn envelope() -> EventEnvelope {
        let hb = Heartbeat::from(&HeartbeatFrame::default());
        EventEnvelope::with_timestamp(SenderId::new(1, 1), 0, DomainMessage::Heartbeat(hb))
    }

    async fn add(topic: &Topic, id: u64, capacity: usize) -> mpsc::Receiver<EventEnvelope> {
        let (tx, rx) = mpsc::channel(capacity);
        let endpoint = Endpoint::new(SubscriberId(id), tx, Arc::new(AtomicU64::new(0)));
        topic.endpoints().write().await.push(endpoint);
        rx
    }

    #[test]
    fn test_topic_names() {
        assert_eq!(TopicKind::Heartbeat.to_string(), "heartbeat");
        assert_eq!(TopicKind::RawGps.to_string(), "raw_gps");
        assert_eq!(
            serde_json::to_string(&TopicKind::RawGps).unwrap(),
            "\"raw_gps\""
        );
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let topic = Topic::new(TopicKind::Heartbeat);
        let mut rx = add(&topic, 1, 4).await;

        assert!(topic.remove(SubscriberId(1)).await);
        assert!(!topic.remove(SubscriberId(1)).await);
        assert_eq!(topic.len().await, 0);

        // Sender dropped with the endpoint
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_broadcast_report() {
        let topic = Topic::new(TopicKind::Heartbeat);
        let _fast = add(&topic, 1, 4).await;
        let _slow = add(&topic, 2, 1).await;
        let gone = add(&topic, 3, 4).await;
        drop(gone);

        let first = topic.broadcast(&envelope()).await;
        assert_eq!(
            first,
            BroadcastReport {
                delivered: 2,
                dropped: 0,
                closed: 1
            }
        );

        let second = topic.broadcast(&envelope()).await;
        assert_eq!(second.delivered, 1);
        assert_eq!(second.dropped, 1);

        assert_eq!(topic.prune_closed().await, 1);
        assert_eq!(topic.len().await, 2);
    }

    #[tokio::test]
    async fn test_close_drains() {
        let topic = Topic::new(TopicKind::RawGps);
        let mut a = add(&topic, 1, 4).await;
        let mut b = add(&topic, 2, 4).await;

        assert_eq!(topic.close().await, 2);
        assert_eq!(topic.close().await, 0);
        assert!(a.recv().await.is_none());
        assert!(b.recv().await.is_none());
    }
}
