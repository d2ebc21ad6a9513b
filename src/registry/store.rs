//! Topic registry implementation
//!
//! Owns every topic's subscriber set and the cancellation watchers that
//! keep those sets in step with subscriber lifetimes.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::endpoint::{Endpoint, SubscriberId};
use super::error::RegistryError;
use super::subscription::Subscription;
use super::topic::{BroadcastReport, Topic, TopicKind};
use crate::config::DEFAULT_SUBSCRIBER_CAPACITY;
use crate::dispatcher::EventEnvelope;

/// Subscriber sets for all topics
///
/// Thread-safe via one `RwLock` per topic, so broadcasts on different
/// topics never contend and broadcasts on the same topic share the lock.
pub struct TopicRegistry {
    heartbeat: Topic,
    raw_gps: Topic,

    /// Queue capacity of every new endpoint
    capacity: usize,

    next_id: AtomicU64,

    /// Set by the first `close`
    closed: AtomicBool,

    /// Fired by `close`
    shutdown: CancellationToken,

    /// One watcher per subscription
    watchers: TaskTracker,
}

impl TopicRegistry {
    /// Create a registry with the default queue capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SUBSCRIBER_CAPACITY)
    }

    /// Create a registry whose endpoints buffer `capacity` envelopes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heartbeat: Topic::new(TopicKind::Heartbeat),
            raw_gps: Topic::new(TopicKind::RawGps),
            capacity: capacity.max(1),
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
            watchers: TaskTracker::new(),
        }
    }

    fn topic(&self, kind: TopicKind) -> &Topic {
        match kind {
            TopicKind::Heartbeat => &self.heartbeat,
            TopicKind::RawGps => &self.raw_gps,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a new endpoint on `kind`
    ///
    /// The endpoint is removed when `cancel` (or any parent of it) fires,
    /// when the returned [`Subscription`] is dropped, or when the registry
    /// closes, whichever happens first.
    pub async fn subscribe(
        self: &Arc<Self>,
        kind: TopicKind,
        cancel: &CancellationToken,
    ) -> Result<Subscription, RegistryError> {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let token = cancel.child_token();
        let dropped = Arc::new(AtomicU64::new(0));
        let (tx, rx) = mpsc::channel(self.capacity);

        {
            let mut endpoints = self.topic(kind).endpoints().write().await;

            // Checked under the lock so `close` cannot miss this endpoint
            if self.shutdown.is_cancelled() {
                return Err(RegistryError::Closed);
            }

            endpoints.push(Endpoint::new(id, tx, Arc::clone(&dropped)));

            // Spawned before the lock is released, so `close` always waits on it
            self.spawn_watcher(kind, id, token.clone());

            tracing::debug!(
                topic = %kind,
                subscriber = %id,
                subscribers = endpoints.len(),
                "Subscriber added"
            );
        }

        Ok(Subscription::new(id, kind, rx, dropped, token))
    }

    fn spawn_watcher(self: &Arc<Self>, kind: TopicKind, id: SubscriberId, token: CancellationToken) {
        let registry: Weak<Self> = Arc::downgrade(self);
        let shutdown = self.shutdown.clone();

        self.watchers.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    if let Some(registry) = registry.upgrade() {
                        registry.unsubscribe(kind, id).await;
                    }
                }
                _ = shutdown.cancelled() => {}
            }
        });
    }

    /// Remove an endpoint. Removing one that is already gone is a no-op.
    pub async fn unsubscribe(&self, kind: TopicKind, id: SubscriberId) -> bool {
        let removed = self.topic(kind).remove(id).await;

        if removed {
            tracing::debug!(topic = %kind, subscriber = %id, "Subscriber removed");
        }

        removed
    }

    /// Offer `envelope` to every subscriber of its topic
    ///
    /// Never waits on a subscriber: a full queue loses this envelope.
    pub async fn broadcast(&self, envelope: &EventEnvelope) -> BroadcastReport {
        let topic = self.topic(envelope.topic());
        let report = topic.broadcast(envelope).await;

        if report.closed > 0 {
            topic.prune_closed().await;
        }

        report
    }

    pub async fn subscriber_count(&self, kind: TopicKind) -> usize {
        self.topic(kind).len().await
    }

    /// Close every endpoint and join all watchers. Safe to call repeatedly.
    ///
    /// Returns `true` only for the call that actually closed the registry.
    pub async fn close(&self) -> bool {
        let first = !self.closed.swap(true, Ordering::AcqRel);
        self.shutdown.cancel();

        let mut closed = 0;
        for kind in TopicKind::ALL {
            closed += self.topic(kind).close().await;
        }

        self.watchers.close();
        self.watchers.wait().await;

        if first {
            tracing::info!(closed_subscribers = closed, "Topic registry closed");
        }

        first
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TopicRegistry {
    fn drop(&mut self) {
        // Lets any remaining watchers exit
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::convert::{DomainMessage, Heartbeat, RawGpsFix};
    use crate::protocol::{GpsRawIntFrame, HeartbeatFrame, SenderId};

    fn heartbeat(ts: u64) -> EventEnvelope {
        let hb = Heartbeat::from(&HeartbeatFrame::default());
        EventEnvelope::with_timestamp(SenderId::new(1, 1), ts, DomainMessage::Heartbeat(hb))
    }

    fn raw_gps(ts: u64) -> EventEnvelope {
        let fix = RawGpsFix::from(&GpsRawIntFrame::default());
        EventEnvelope::with_timestamp(SenderId::new(1, 1), ts, DomainMessage::RawGps(fix))
    }

    async fn wait_for_count(registry: &TopicRegistry, kind: TopicKind, count: usize) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while registry.subscriber_count(kind).await != count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_fan_out_to_every_subscriber() {
        let registry = Arc::new(TopicRegistry::new());
        let cancel = CancellationToken::new();

        let mut subs = Vec::new();
        for _ in 0..5 {
            subs.push(
                registry
                    .subscribe(TopicKind::Heartbeat, &cancel)
                    .await
                    .unwrap(),
            );
        }

        let report = registry.broadcast(&heartbeat(7)).await;
        assert_eq!(report.delivered, 5);

        for sub in &mut subs {
            assert_eq!(sub.recv().await.unwrap().timestamp_ms, 7);
            assert!(sub.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_topics_are_independent() {
        let registry = Arc::new(TopicRegistry::new());
        let cancel = CancellationToken::new();

        let mut hb = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();
        let mut gps = registry
            .subscribe(TopicKind::RawGps, &cancel)
            .await
            .unwrap();

        registry.broadcast(&raw_gps(1)).await;

        assert_eq!(gps.recv().await.unwrap().topic(), TopicKind::RawGps);
        assert!(hb.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_no_delivery_after_unsubscribe() {
        let registry = Arc::new(TopicRegistry::new());
        let cancel = CancellationToken::new();

        let mut stays = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();
        let mut leaves = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();

        assert!(registry.unsubscribe(TopicKind::Heartbeat, leaves.id()).await);
        assert!(!registry.unsubscribe(TopicKind::Heartbeat, leaves.id()).await);

        let report = registry.broadcast(&heartbeat(1)).await;
        assert_eq!(report.delivered, 1);

        assert!(stays.recv().await.is_some());
        assert!(leaves.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_backpressure_isolation() {
        let registry = Arc::new(TopicRegistry::with_capacity(1));
        let cancel = CancellationToken::new();

        let mut slow = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();
        let mut fast = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();

        // Fill both, then drain only the fast one
        registry.broadcast(&heartbeat(1)).await;
        assert_eq!(fast.recv().await.unwrap().timestamp_ms, 1);

        let report = registry.broadcast(&heartbeat(2)).await;
        assert_eq!(report.delivered, 1);
        assert_eq!(report.dropped, 1);

        assert_eq!(fast.recv().await.unwrap().timestamp_ms, 2);
        assert_eq!(slow.dropped(), 1);
        assert_eq!(fast.dropped(), 0);

        // The slow reader still sees the oldest envelope, in order
        assert_eq!(slow.recv().await.unwrap().timestamp_ms, 1);
        assert!(slow.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_per_subscriber_order() {
        let registry = Arc::new(TopicRegistry::with_capacity(16));
        let cancel = CancellationToken::new();
        let mut sub = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();

        for ts in 0..10 {
            registry.broadcast(&heartbeat(ts)).await;
        }
        for ts in 0..10 {
            assert_eq!(sub.recv().await.unwrap().timestamp_ms, ts);
        }
    }

    #[tokio::test]
    async fn test_cancellation_removes_endpoint() {
        let registry = Arc::new(TopicRegistry::new());
        let parent = CancellationToken::new();
        let mut sub = registry
            .subscribe(TopicKind::RawGps, &parent)
            .await
            .unwrap();

        assert_eq!(registry.subscriber_count(TopicKind::RawGps).await, 1);

        parent.cancel();
        wait_for_count(&registry, TopicKind::RawGps, 0).await;

        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_drop_removes_endpoint() {
        let registry = Arc::new(TopicRegistry::new());
        let cancel = CancellationToken::new();
        let sub = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();

        drop(sub);
        wait_for_count(&registry, TopicKind::Heartbeat, 0).await;
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_unsubscribe_during_broadcast() {
        let registry = Arc::new(TopicRegistry::with_capacity(4));
        let cancel = CancellationToken::new();
        let mut sub = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();
        let id = sub.id();

        let producer = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                for ts in 0..200 {
                    registry.broadcast(&heartbeat(ts)).await;
                    tokio::task::yield_now().await;
                }
            })
        };

        tokio::task::yield_now().await;
        sub.cancel();
        // Explicit unsubscribe racing the watcher
        registry.unsubscribe(TopicKind::Heartbeat, id).await;

        producer.await.unwrap();
        wait_for_count(&registry, TopicKind::Heartbeat, 0).await;

        // Whatever was queued before removal drains, then the queue is closed
        while sub.recv().await.is_some() {}
        assert!(sub.try_recv().is_err());
        assert!(!registry.unsubscribe(TopicKind::Heartbeat, id).await);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let registry = Arc::new(TopicRegistry::new());
        let cancel = CancellationToken::new();
        let mut hb = registry
            .subscribe(TopicKind::Heartbeat, &cancel)
            .await
            .unwrap();
        let mut gps = registry
            .subscribe(TopicKind::RawGps, &cancel)
            .await
            .unwrap();

        assert!(registry.close().await);
        assert!(!registry.close().await);

        assert!(registry.is_closed());
        assert!(hb.recv().await.is_none());
        assert!(gps.recv().await.is_none());
        assert_eq!(registry.subscriber_count(TopicKind::Heartbeat).await, 0);

        // Cancelling after close is harmless
        cancel.cancel();
        assert_eq!(registry.broadcast(&heartbeat(1)).await, BroadcastReport::default());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_close_has_one_winner() {
        for _ in 0..100 {
            let registry = Arc::new(TopicRegistry::new());
            let _sub = registry
                .subscribe(TopicKind::Heartbeat, &CancellationToken::new())
                .await
                .unwrap();

            let closers: Vec<_> = (0..4)
                .map(|_| {
                    let registry = Arc::clone(&registry);
                    tokio::spawn(async move { registry.close().await })
                })
                .collect();

            let mut winners = 0;
            for closer in closers {
                if closer.await.unwrap() {
                    winners += 1;
                }
            }
            assert_eq!(winners, 1);
            assert!(registry.is_closed());
        }
    }

    #[tokio::test]
    async fn test_subscribe_after_close_fails() {
        let registry = Arc::new(TopicRegistry::new());
        registry.close().await;

        let result = registry
            .subscribe(TopicKind::Heartbeat, &CancellationToken::new())
            .await;
        assert_eq!(result.unwrap_err(), RegistryError::Closed);
    }

    #[test]
    fn test_capacity_is_at_least_one() {
        assert_eq!(TopicRegistry::with_capacity(0).capacity(), 1);
        assert_eq!(TopicRegistry::new().capacity(), DEFAULT_SUBSCRIBER_CAPACITY);
    }
}
