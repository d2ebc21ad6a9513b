//! HEARTBEAT payload
//!
//! Wire layout (little-endian, fields reordered by size as MAVLink does):
//!
//! ```text
//! +----------------+------+-----------+-----------+---------------+-----------------+
//! | custom_mode(4) | type | autopilot | base_mode | system_status | mavlink_version |
//! +----------------+------+-----------+-----------+---------------+-----------------+
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::constants::HEARTBEAT_PAYLOAD_LEN;
use super::frame::zero_extended;

/// Undecoded HEARTBEAT fields, exactly as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeartbeatFrame {
    /// Autopilot-specific mode word
    pub custom_mode: u32,
    /// MAV_TYPE
    pub vehicle_type: u8,
    /// MAV_AUTOPILOT
    pub autopilot: u8,
    /// MAV_MODE_FLAG bitfield
    pub base_mode: u8,
    /// MAV_STATE
    pub system_status: u8,
    /// MAVLink protocol version
    pub mavlink_version: u8,
}

impl HeartbeatFrame {
    /// Decode a HEARTBEAT payload.
    ///
    /// Short payloads are zero-extended, which is how MAVLink 2 restores
    /// truncated trailing zero bytes. Extra bytes are ignored.
    pub fn decode(payload: &[u8]) -> Self {
        let raw = zero_extended::<HEARTBEAT_PAYLOAD_LEN>(payload);
        let mut data = &raw[..];

        let custom_mode = data.get_u32_le();
        let vehicle_type = data.get_u8();
        let autopilot = data.get_u8();
        let base_mode = data.get_u8();
        let system_status = data.get_u8();
        let mavlink_version = data.get_u8();

        Self {
            custom_mode,
            vehicle_type,
            autopilot,
            base_mode,
            system_status,
            mavlink_version,
        }
    }

    /// Encode to a full-length payload
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEARTBEAT_PAYLOAD_LEN);
        buf.put_u32_le(self.custom_mode);
        buf.put_u8(self.vehicle_type);
        buf.put_u8(self.autopilot);
        buf.put_u8(self.base_mode);
        buf.put_u8(self.system_status);
        buf.put_u8(self.mavlink_version);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_px4_heartbeat() {
        // custom_mode 0x04040000 (AUTO/MISSION), quadrotor, PX4, armed+custom, active, v3
        let payload = [0x00, 0x00, 0x04, 0x04, 0x02, 0x0C, 0x81, 0x04, 0x03];
        let hb = HeartbeatFrame::decode(&payload);

        assert_eq!(hb.custom_mode, 0x0404_0000);
        assert_eq!(hb.vehicle_type, 2);
        assert_eq!(hb.autopilot, 12);
        assert_eq!(hb.base_mode, 0x81);
        assert_eq!(hb.system_status, 4);
        assert_eq!(hb.mavlink_version, 3);
    }

    #[test]
    fn test_decode_truncated_payload() {
        // MAVLink 2 drops trailing zeros: status and version are both 0 here
        let payload = [0x00, 0x00, 0x01, 0x00, 0x01, 0x03, 0x00];
        let hb = HeartbeatFrame::decode(&payload);

        assert_eq!(hb.custom_mode, 0x0001_0000);
        assert_eq!(hb.vehicle_type, 1);
        assert_eq!(hb.autopilot, 3);
        assert_eq!(hb.system_status, 0);
        assert_eq!(hb.mavlink_version, 0);
    }

    #[test]
    fn test_decode_empty_payload() {
        assert_eq!(HeartbeatFrame::decode(&[]), HeartbeatFrame::default());
    }

    #[test]
    fn test_encode_layout() {
        let hb = HeartbeatFrame {
            custom_mode: 0x0302_0000,
            vehicle_type: 13,
            autopilot: 12,
            base_mode: 0x1D,
            system_status: 3,
            mavlink_version: 3,
        };

        let encoded = hb.encode();
        assert_eq!(encoded.len(), HEARTBEAT_PAYLOAD_LEN);
        assert_eq!(&encoded[..4], &[0x00, 0x00, 0x02, 0x03]);
        assert_eq!(HeartbeatFrame::decode(&encoded), hb);
    }
}
