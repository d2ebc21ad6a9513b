//! Protocol-to-domain conversion
//!
//! Pure functions from one decoded [`Frame`] to one [`DomainMessage`].
//! Nothing here allocates shared state, blocks, or fails: values without
//! a schema name become "unspecified" or `Other`, and frame kinds without
//! a converter yield `None`.
//!
//! ```text
//!  Frame ──► convert() ──► Some(DomainMessage::Heartbeat(..))  ─► heartbeat topic
//!                     ├──► Some(DomainMessage::RawGps(..))     ─► raw_gps topic
//!                     └──► None                                ─► ignored
//! ```

pub mod base_mode;
pub mod custom_mode;
pub mod enums;
pub mod gps;
pub mod heartbeat;

pub use base_mode::BaseMode;
pub use custom_mode::{CustomMode, MainMode, Px4CustomMode, SubMode};
pub use enums::{GpsFixType, MavAutopilot, MavState, MavType};
pub use gps::RawGpsFix;
pub use heartbeat::Heartbeat;

use serde::Serialize;

use crate::protocol::{Frame, FramePayload};
use crate::registry::TopicKind;

/// A converted frame payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainMessage {
    Heartbeat(Heartbeat),
    RawGps(RawGpsFix),
}

impl DomainMessage {
    /// Topic this message is published on
    pub fn topic(&self) -> TopicKind {
        match self {
            DomainMessage::Heartbeat(_) => TopicKind::Heartbeat,
            DomainMessage::RawGps(_) => TopicKind::RawGps,
        }
    }
}

/// Convert a frame, or `None` if the bridge has no converter for its kind
pub fn convert(frame: &Frame) -> Option<DomainMessage> {
    match &frame.payload {
        FramePayload::Heartbeat(hb) => Some(DomainMessage::Heartbeat(Heartbeat::from(hb))),
        FramePayload::GpsRawInt(gps) => Some(DomainMessage::RawGps(RawGpsFix::from(gps))),
        FramePayload::Unsupported { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{GpsRawIntFrame, HeartbeatFrame, SenderId};

    #[test]
    fn test_heartbeat_end_to_end() {
        let frame = Frame::heartbeat(
            SenderId::new(1, 1),
            HeartbeatFrame {
                custom_mode: 0x0202_0000,
                vehicle_type: 2,
                autopilot: 12,
                base_mode: 0b1000_0001,
                system_status: 3,
                mavlink_version: 3,
            },
        );

        let Some(DomainMessage::Heartbeat(hb)) = convert(&frame) else {
            panic!("expected heartbeat");
        };

        assert_eq!(hb.vehicle_type.raw(), 2);
        assert_eq!(hb.autopilot, MavAutopilot::Px4);
        assert_eq!(
            hb.base_mode,
            BaseMode {
                custom_mode_enabled: true,
                safety_armed: true,
                ..Default::default()
            }
        );
        // ALTCTL is the second main mode and has no sub modes of its own
        assert_eq!(hb.custom_mode.main_mode, MainMode::Altctl);
        assert_eq!(hb.custom_mode.sub_mode, SubMode::Unspecified);
    }

    #[test]
    fn test_gps_converts() {
        let frame = Frame::gps_raw_int(
            SenderId::new(1, 1),
            GpsRawIntFrame {
                fix_type: 3,
                ..Default::default()
            },
        );

        let message = convert(&frame).unwrap();
        assert_eq!(message.topic(), TopicKind::RawGps);
        assert!(matches!(message, DomainMessage::RawGps(fix) if fix.fix_type == GpsFixType::Fix3d));
    }

    #[test]
    fn test_unsupported_is_not_applicable() {
        let frame = Frame::new(
            SenderId::new(1, 1),
            FramePayload::Unsupported { message_id: 30 },
        );
        assert_eq!(convert(&frame), None);
    }

    #[test]
    fn test_convert_is_deterministic() {
        let frame = Frame::heartbeat(SenderId::new(3, 1), HeartbeatFrame::default());
        assert_eq!(convert(&frame), convert(&frame));
    }
}
