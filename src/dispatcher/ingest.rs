//! Ingest loop
//!
//! The only reader of the frame source. Runs on its own task from
//! `Dispatcher::start` until the source is exhausted or shutdown fires,
//! then closes the registry so every subscriber sees end-of-stream.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::envelope::EventEnvelope;
use super::phase::DispatcherPhase;
use crate::convert::convert;
use crate::protocol::{Frame, FrameSource, MessageId};
use crate::registry::TopicRegistry;
use crate::stats::DispatchStats;

pub(crate) struct Ingest<S> {
    pub(crate) source: S,
    pub(crate) registry: Arc<TopicRegistry>,
    pub(crate) stats: Arc<DispatchStats>,
    pub(crate) phase: Arc<watch::Sender<DispatcherPhase>>,
    pub(crate) shutdown: CancellationToken,
}

impl<S: FrameSource> Ingest<S> {
    pub(crate) async fn run(self) {
        let Ingest {
            mut source,
            registry,
            stats,
            phase,
            shutdown,
        } = self;

        loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    tracing::info!("Shutdown requested, ingest stopping");
                    break;
                }
                next = source.next_frame() => next,
            };

            match next {
                Some(frame) => dispatch(&registry, &stats, &frame).await,
                None => {
                    tracing::info!("Frame source closed");
                    break;
                }
            }
        }

        phase.send_if_modified(|phase| {
            if *phase == DispatcherPhase::Running {
                *phase = DispatcherPhase::Draining;
                true
            } else {
                false
            }
        });

        // Nothing is broadcast past this point, so closing cannot race a send
        registry.close().await;
        phase.send_replace(DispatcherPhase::Stopped);

        let stats = stats.snapshot();
        tracing::info!(
            frames = stats.frames_received,
            ignored = stats.frames_ignored,
            delivered = stats.envelopes_delivered,
            dropped = stats.envelopes_dropped,
            "Dispatcher stopped"
        );
    }
}

/// Convert one frame and broadcast it to its topic
async fn dispatch(registry: &TopicRegistry, stats: &DispatchStats, frame: &Frame) {
    stats.record_frame();

    let Some(message) = convert(frame) else {
        stats.record_ignored();
        tracing::debug!(
            sender = %frame.sender,
            message_id = frame.message_id(),
            message = MessageId::name_of(frame.message_id()),
            "Ignoring frame"
        );
        return;
    };

    let envelope = EventEnvelope::new(frame.sender, message);
    let report = registry.broadcast(&envelope).await;
    stats.record_broadcast(envelope.topic(), &report);
}
