//! Decoded upstream frames
//!
//! A [`Frame`] is what the link reader hands to the dispatcher: the sender
//! identity plus a payload already split into named wire fields. Message
//! kinds the bridge has no converter for are kept as
//! [`FramePayload::Unsupported`] so the dispatcher can skip them.

use bytes::Bytes;
use serde::Serialize;

use super::constants::{MSG_ID_GPS_RAW_INT, MSG_ID_HEARTBEAT};
use super::gps::GpsRawIntFrame;
use super::heartbeat::HeartbeatFrame;

/// Identity of the MAVLink system/component that sent a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SenderId {
    /// System ID (vehicle)
    pub system_id: u8,
    /// Component ID within the system
    pub component_id: u8,
}

impl SenderId {
    pub fn new(system_id: u8, component_id: u8) -> Self {
        Self {
            system_id,
            component_id,
        }
    }
}

impl std::fmt::Display for SenderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.system_id, self.component_id)
    }
}

/// Kind-specific frame contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramePayload {
    /// HEARTBEAT (#0)
    Heartbeat(HeartbeatFrame),
    /// GPS_RAW_INT (#24)
    GpsRawInt(GpsRawIntFrame),
    /// Any message the bridge does not convert
    Unsupported { message_id: u32 },
}

impl FramePayload {
    /// MAVLink message ID of this payload
    pub fn message_id(&self) -> u32 {
        match self {
            FramePayload::Heartbeat(_) => MSG_ID_HEARTBEAT,
            FramePayload::GpsRawInt(_) => MSG_ID_GPS_RAW_INT,
            FramePayload::Unsupported { message_id } => *message_id,
        }
    }
}

/// One decoded upstream frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Who sent it
    pub sender: SenderId,
    /// What it carries
    pub payload: FramePayload,
}

impl Frame {
    pub fn new(sender: SenderId, payload: FramePayload) -> Self {
        Self { sender, payload }
    }

    /// Create a HEARTBEAT frame
    pub fn heartbeat(sender: SenderId, heartbeat: HeartbeatFrame) -> Self {
        Self::new(sender, FramePayload::Heartbeat(heartbeat))
    }

    /// Create a GPS_RAW_INT frame
    pub fn gps_raw_int(sender: SenderId, gps: GpsRawIntFrame) -> Self {
        Self::new(sender, FramePayload::GpsRawInt(gps))
    }

    pub fn message_id(&self) -> u32 {
        self.payload.message_id()
    }
}

/// A validated frame whose payload has not been split into fields yet
///
/// This is the shape a link reader produces after checksum/sequence
/// handling: message ID, sender, and the payload bytes.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// MAVLink message ID
    pub message_id: u32,
    /// Who sent it
    pub sender: SenderId,
    /// Payload bytes (possibly truncated by MAVLink 2)
    pub payload: Bytes,
}

impl RawFrame {
    pub fn new(message_id: u32, sender: SenderId, payload: Bytes) -> Self {
        Self {
            message_id,
            sender,
            payload,
        }
    }

    /// Decode the payload by message ID. Never fails.
    pub fn decode(&self) -> Frame {
        let payload = match self.message_id {
            MSG_ID_HEARTBEAT => FramePayload::Heartbeat(HeartbeatFrame::decode(&self.payload)),
            MSG_ID_GPS_RAW_INT => FramePayload::GpsRawInt(GpsRawIntFrame::decode(&self.payload)),
            message_id => FramePayload::Unsupported { message_id },
        };

        Frame::new(self.sender, payload)
    }
}

impl From<RawFrame> for Frame {
    fn from(raw: RawFrame) -> Self {
        raw.decode()
    }
}

impl From<&Frame> for RawFrame {
    /// Re-encode a frame. Unsupported frames come back with an empty payload.
    fn from(frame: &Frame) -> Self {
        let payload = match &frame.payload {
            FramePayload::Heartbeat(hb) => hb.encode(),
            FramePayload::GpsRawInt(gps) => gps.encode(),
            FramePayload::Unsupported { .. } => Bytes::new(),
        };

        RawFrame::new(frame.message_id(), frame.sender, payload)
    }
}

/// Copy `payload` into a zeroed buffer of exactly `N` bytes
pub(crate) fn zero_extended<const N: usize>(payload: &[u8]) -> [u8; N] {
    let mut buf = [0u8; N];
    let len = payload.len().min(N);
    buf[..len].copy_from_slice(&payload[..len]);
    buf
}
