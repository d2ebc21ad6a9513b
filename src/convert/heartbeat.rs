//! HEARTBEAT conversion

use serde::Serialize;

use super::base_mode::BaseMode;
use super::custom_mode::CustomMode;
use super::enums::{MavAutopilot, MavState, MavType};
use crate::protocol::HeartbeatFrame;

/// Vehicle heartbeat in schema form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Heartbeat {
    #[serde(rename = "type")]
    pub vehicle_type: MavType,
    pub autopilot: MavAutopilot,
    pub base_mode: BaseMode,
    pub custom_mode: CustomMode,
    pub system_status: MavState,
    pub mavlink_version: u32,
}

impl From<&HeartbeatFrame> for Heartbeat {
    fn from(frame: &HeartbeatFrame) -> Self {
        let autopilot = MavAutopilot::from_raw(frame.autopilot);

        Self {
            vehicle_type: MavType::from_raw(frame.vehicle_type),
            autopilot,
            base_mode: BaseMode::from_bits(frame.base_mode),
            custom_mode: CustomMode::decode(frame.custom_mode, autopilot),
            system_status: MavState::from_raw(frame.system_status),
            mavlink_version: u32::from(frame.mavlink_version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::custom_mode::{MainMode, SubMode};

    #[test]
    fn test_px4_quadrotor() {
        let frame = HeartbeatFrame {
            custom_mode: 0x0404_0000,
            vehicle_type: 2,
            autopilot: 12,
            base_mode: 0b1001_1101,
            system_status: 4,
            mavlink_version: 3,
        };

        let hb = Heartbeat::from(&frame);
        assert_eq!(hb.vehicle_type, MavType::Quadrotor);
        assert_eq!(hb.autopilot, MavAutopilot::Px4);
        assert_eq!(hb.base_mode.bits(), 0b1001_1101);
        assert_eq!(hb.custom_mode.main_mode, MainMode::Auto);
        assert_eq!(hb.custom_mode.sub_mode, SubMode::AutoMission);
        assert_eq!(hb.system_status, MavState::Active);
        assert_eq!(hb.mavlink_version, 3);
    }

    #[test]
    fn test_ardupilot_custom_mode_unspecified() {
        let frame = HeartbeatFrame {
            custom_mode: 0x0404_0000,
            autopilot: 3,
            ..Default::default()
        };

        let hb = Heartbeat::from(&frame);
        assert_eq!(hb.custom_mode, CustomMode::UNSPECIFIED);
        assert_eq!(hb.system_status, MavState::Unspecified);
    }

    #[test]
    fn test_json_shape() {
        let frame = HeartbeatFrame {
            vehicle_type: 1,
            autopilot: 12,
            base_mode: 0x80,
            ..Default::default()
        };

        let json = serde_json::to_value(Heartbeat::from(&frame)).unwrap();
        assert_eq!(json["type"], "FIXED_WING");
        assert_eq!(json["autopilot"], "PX4");
        assert_eq!(json["base_mode"]["safety_armed"], true);
        assert_eq!(json["custom_mode"]["main_mode"], "UNSPECIFIED");
    }
}
