//! Downstream stream sinks

use std::future::Future;

use tokio::sync::mpsc;

use crate::dispatcher::EventEnvelope;

/// The send half of one open downstream stream
///
/// A transport implements this for its per-call stream handle. An error
/// means the stream is gone (client disconnected, transport closed).
pub trait StreamSink: Send {
    type Error: Send;

    fn send(&mut self, envelope: EventEnvelope)
        -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// In-process streams, e.g. a per-connection writer task
impl StreamSink for mpsc::Sender<EventEnvelope> {
    type Error = mpsc::error::SendError<EventEnvelope>;

    async fn send(&mut self, envelope: EventEnvelope) -> Result<(), Self::Error> {
        mpsc::Sender::send(self, envelope).await
    }
}
