//! Fan-out dispatcher

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::ingest::Ingest;
use super::phase::DispatcherPhase;
use crate::config::DispatcherConfig;
use crate::error::{Error, Result};
use crate::protocol::{frame_channel, FrameSource};
use crate::registry::{RegistryError, Subscription, TopicKind, TopicRegistry};
use crate::stats::{DispatchStats, DispatchStatsSnapshot};

/// Reads one frame source and fans converted messages out to subscribers
///
/// # Example
///
/// ```no_run
/// use telemetry_bridge::protocol::RawFrame;
/// use telemetry_bridge::{Dispatcher, DispatcherConfig};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn run() -> telemetry_bridge::Result<()> {
/// let dispatcher = Dispatcher::new(DispatcherConfig::default());
/// let (link, source) = dispatcher.frame_channel::<RawFrame>();
/// dispatcher.start(source)?;
///
/// let mut heartbeats = dispatcher
///     .subscribe_heartbeat(&CancellationToken::new())
///     .await?;
/// while let Some(envelope) = heartbeats.recv().await {
///     println!("{:?}", envelope.message);
/// }
/// # drop(link);
/// # Ok(())
/// # }
/// ```
pub struct Dispatcher {
    config: DispatcherConfig,
    registry: Arc<TopicRegistry>,
    stats: Arc<DispatchStats>,
    phase: Arc<watch::Sender<DispatcherPhase>>,
    shutdown: CancellationToken,
    ingest: Mutex<Option<JoinHandle<()>>>,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        let (phase, _) = watch::channel(DispatcherPhase::Idle);

        Self {
            registry: Arc::new(TopicRegistry::with_capacity(config.subscriber_capacity)),
            stats: Arc::new(DispatchStats::new()),
            phase: Arc::new(phase),
            shutdown: CancellationToken::new(),
            ingest: Mutex::new(None),
            config,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// A bounded channel sized by `frame_buffer`, usable as the frame source
    pub fn frame_channel<T>(&self) -> (mpsc::Sender<T>, mpsc::Receiver<T>) {
        frame_channel(self.config.frame_buffer)
    }

    /// Spawn the ingest loop on `source`
    ///
    /// Only an idle dispatcher can be started, and only once.
    pub fn start<S: FrameSource>(&self, source: S) -> Result<()> {
        let mut ingest = self.ingest.lock().unwrap_or_else(PoisonError::into_inner);

        let mut current = DispatcherPhase::Idle;
        let started = self.phase.send_if_modified(|phase| {
            current = *phase;
            if *phase == DispatcherPhase::Idle {
                *phase = DispatcherPhase::Running;
                true
            } else {
                false
            }
        });

        if !started {
            return Err(match current {
                DispatcherPhase::Running => Error::AlreadyStarted,
                phase => Error::NotRunning(phase),
            });
        }

        let task = Ingest {
            source,
            registry: Arc::clone(&self.registry),
            stats: Arc::clone(&self.stats),
            phase: Arc::clone(&self.phase),
            shutdown: self.shutdown.clone(),
        };
        *ingest = Some(tokio::spawn(task.run()));

        tracing::info!(
            subscriber_capacity = self.registry.capacity(),
            "Dispatcher started"
        );

        Ok(())
    }

    /// Subscribe to a topic
    ///
    /// The subscription ends when `cancel` fires, when it is dropped, or
    /// when the dispatcher stops.
    pub async fn subscribe(
        &self,
        kind: TopicKind,
        cancel: &CancellationToken,
    ) -> Result<Subscription> {
        let phase = self.phase();
        if !phase.is_running() {
            return Err(Error::NotRunning(phase));
        }

        match self.registry.subscribe(kind, cancel).await {
            Ok(subscription) => Ok(subscription),
            // Lost a race with shutdown
            Err(RegistryError::Closed) => Err(Error::NotRunning(self.phase())),
        }
    }

    pub async fn subscribe_heartbeat(&self, cancel: &CancellationToken) -> Result<Subscription> {
        self.subscribe(TopicKind::Heartbeat, cancel).await
    }

    pub async fn subscribe_raw_gps(&self, cancel: &CancellationToken) -> Result<Subscription> {
        self.subscribe(TopicKind::RawGps, cancel).await
    }

    /// Remove a subscription now. A no-op if it is already gone.
    pub async fn unsubscribe(&self, subscription: &Subscription) -> bool {
        self.registry
            .unsubscribe(subscription.topic(), subscription.id())
            .await
    }

    /// Stop ingesting, close every subscription and wait for both
    ///
    /// Safe to call more than once and from several tasks.
    pub async fn shutdown(&self) {
        // Same lock as `start`: a racing start either hands over its handle
        // or sees Draining
        let (handle, owner) = {
            let mut ingest = self.ingest.lock().unwrap_or_else(PoisonError::into_inner);
            let owner = self.phase.send_if_modified(|phase| match *phase {
                DispatcherPhase::Idle | DispatcherPhase::Running => {
                    *phase = DispatcherPhase::Draining;
                    true
                }
                DispatcherPhase::Draining | DispatcherPhase::Stopped => false,
            });
            (ingest.take(), owner)
        };
        if owner {
            tracing::info!("Dispatcher draining");
        }

        self.shutdown.cancel();

        match handle {
            Some(handle) => {
                if let Err(e) = handle.await {
                    tracing::error!(error = %e, "Ingest task failed");
                }
            }
            // Never started, nothing to join
            None if owner => {}
            // Another caller or the ingest task itself owns the teardown
            None => {
                self.stopped().await;
                return;
            }
        }

        self.registry.close().await;
        self.phase.send_if_modified(|phase| {
            if *phase != DispatcherPhase::Stopped {
                *phase = DispatcherPhase::Stopped;
                true
            } else {
                false
            }
        });
    }

    /// Wait until the dispatcher reaches `Stopped`
    pub async fn stopped(&self) {
        let mut rx = self.phase.subscribe();
        let _ = rx.wait_for(|phase| *phase == DispatcherPhase::Stopped).await;
    }

    pub fn phase(&self) -> DispatcherPhase {
        *self.phase.borrow()
    }

    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn registry(&self) -> &Arc<TopicRegistry> {
        &self.registry
    }

    pub async fn subscriber_count(&self, kind: TopicKind) -> usize {
        self.registry.subscriber_count(kind).await
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
