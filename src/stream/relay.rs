//! Subscription-to-stream relay

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::sink::StreamSink;
use crate::registry::Subscription;

/// Why a relay finished without a sink error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayEnd {
    /// The subscription closed (dispatcher stopped or endpoint removed)
    SourceClosed,
    /// The caller cancelled
    Cancelled,
}

/// Forward every envelope from `subscription` to `sink`
///
/// Returns when the subscription closes, when `cancel` fires, or with the
/// sink's error if a send fails. Neither of the first two is an error.
/// The subscription is dropped on return, which removes its endpoint.
pub async fn relay<S: StreamSink>(
    mut subscription: Subscription,
    sink: &mut S,
    cancel: &CancellationToken,
) -> Result<RelayEnd, S::Error> {
    let topic = subscription.topic();
    let id = subscription.id();

    let end = loop {
        let envelope = tokio::select! {
            biased;
            _ = cancel.cancelled() => break RelayEnd::Cancelled,
            next = subscription.recv() => match next {
                Some(envelope) => envelope,
                None => break RelayEnd::SourceClosed,
            },
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break RelayEnd::Cancelled,
            sent = sink.send(envelope) => {
                if let Err(e) = sent {
                    tracing::debug!(topic = %topic, subscriber = %id, "Stream sink closed");
                    return Err(e);
                }
            }
        }
    };

    tracing::debug!(
        topic = %topic,
        subscriber = %id,
        end = ?end,
        dropped = subscription.dropped(),
        "Relay finished"
    );

    Ok(end)
}
