//! Event envelope

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::convert::DomainMessage;
use crate::protocol::SenderId;
use crate::registry::TopicKind;

/// A converted message stamped with its sender and arrival time
///
/// Each subscriber receives its own clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEnvelope {
    #[serde(flatten)]
    pub sender: SenderId,
    /// Arrival time, milliseconds since the UNIX epoch
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub message: DomainMessage,
}

impl EventEnvelope {
    /// Stamp `message` with the current wall-clock time
    pub fn new(sender: SenderId, message: DomainMessage) -> Self {
        Self::with_timestamp(sender, unix_millis(), message)
    }

    pub fn with_timestamp(sender: SenderId, timestamp_ms: u64, message: DomainMessage) -> Self {
        Self {
            sender,
            timestamp_ms,
            message,
        }
    }

    pub fn topic(&self) -> TopicKind {
        self.message.topic()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
