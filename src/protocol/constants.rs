//! MAVLink common-dialect constants used by the bridge

/// HEARTBEAT message ID
pub const MSG_ID_HEARTBEAT: u32 = 0;

/// GPS_RAW_INT message ID
pub const MSG_ID_GPS_RAW_INT: u32 = 24;

/// HEARTBEAT payload length (no extensions)
pub const HEARTBEAT_PAYLOAD_LEN: usize = 9;

/// GPS_RAW_INT payload length without MAVLink 2 extension fields
pub const GPS_RAW_INT_BASE_LEN: usize = 30;

/// GPS_RAW_INT payload length including extension fields
pub const GPS_RAW_INT_PAYLOAD_LEN: usize = 52;

/// MAV_AUTOPILOT_PX4
pub const MAV_AUTOPILOT_PX4: u8 = 12;

/// Sentinel for unknown 16-bit GPS quantities (vel, cog, eph, epv)
pub const GPS_UNKNOWN_U16: u16 = u16::MAX;

/// Sentinel for an unknown satellite count
pub const GPS_UNKNOWN_SATELLITES: u8 = u8::MAX;

/// GPS yaw value meaning "not available" (36000 encodes north)
pub const GPS_YAW_NOT_AVAILABLE: u16 = 0;

/// GPS yaw value from a receiver configured for yaw that cannot provide it
pub const GPS_YAW_UNKNOWN: u16 = u16::MAX;
