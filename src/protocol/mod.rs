//! Upstream protocol boundary
//!
//! Types the dispatcher consumes from the MAVLink link reader:
//!
//! - [`Frame`]: sender identity plus a payload split into wire fields
//! - [`RawFrame`]: validated payload bytes, decoded into a [`Frame`]
//! - [`FrameSource`]: the lazy stream of frames the dispatcher reads
//!
//! Only HEARTBEAT and GPS_RAW_INT are decoded. Every other message ID
//! becomes [`FramePayload::Unsupported`] and is skipped downstream.

pub mod constants;
pub mod frame;
pub mod gps;
pub mod heartbeat;
pub mod message_id;
pub mod source;

pub use constants::*;
pub use frame::{Frame, FramePayload, RawFrame, SenderId};
pub use gps::GpsRawIntFrame;
pub use heartbeat::HeartbeatFrame;
pub use message_id::MessageId;
pub use source::{frame_channel, FrameSource};
