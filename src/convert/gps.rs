//! GPS_RAW_INT conversion
//!
//! Fields with an "unknown" sentinel on the wire become `None` here and
//! are left out of the serialized form, so a consumer never mistakes
//! 65535 cm/s for real motion.

use serde::Serialize;

use super::enums::GpsFixType;
use crate::protocol::{
    GpsRawIntFrame, GPS_UNKNOWN_SATELLITES, GPS_UNKNOWN_U16, GPS_YAW_NOT_AVAILABLE,
    GPS_YAW_UNKNOWN,
};

const DEGREES_E7: f64 = 1e7;

/// Raw GNSS fix in schema form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawGpsFix {
    /// Timestamp (UNIX epoch or time since boot), microseconds
    pub time_usec: u64,
    pub fix_type: GpsFixType,
    /// Latitude, degrees * 1e7
    pub lat: i32,
    /// Longitude, degrees * 1e7
    pub lon: i32,
    /// Altitude above MSL, millimetres
    pub alt: i32,
    /// HDOP * 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eph: Option<u16>,
    /// VDOP * 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epv: Option<u16>,
    /// Ground speed, cm/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vel: Option<u16>,
    /// Course over ground, centidegrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cog: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satellites_visible: Option<u8>,
    /// Altitude above the WGS84 ellipsoid, millimetres
    pub alt_ellipsoid: i32,
    /// Horizontal position uncertainty, millimetres
    pub h_acc: u32,
    /// Vertical position uncertainty, millimetres
    pub v_acc: u32,
    /// Speed uncertainty, mm/s
    pub vel_acc: u32,
    /// Heading uncertainty, degrees * 1e5
    pub hdg_acc: u32,
    /// Yaw relative to north, centidegrees (north is 36000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaw: Option<u16>,
}

fn known_u16(value: u16) -> Option<u16> {
    (value != GPS_UNKNOWN_U16).then_some(value)
}

fn known_yaw(value: u16) -> Option<u16> {
    (value != GPS_YAW_NOT_AVAILABLE && value != GPS_YAW_UNKNOWN).then_some(value)
}

impl From<&GpsRawIntFrame> for RawGpsFix {
    fn from(frame: &GpsRawIntFrame) -> Self {
        Self {
            time_usec: frame.time_usec,
            fix_type: GpsFixType::from_mavlink(frame.fix_type),
            lat: frame.lat,
            lon: frame.lon,
            alt: frame.alt,
            eph: known_u16(frame.eph),
            epv: known_u16(frame.epv),
            vel: known_u16(frame.vel),
            cog: known_u16(frame.cog),
            satellites_visible: (frame.satellites_visible != GPS_UNKNOWN_SATELLITES)
                .then_some(frame.satellites_visible),
            alt_ellipsoid: frame.alt_ellipsoid,
            h_acc: frame.h_acc,
            v_acc: frame.v_acc,
            vel_acc: frame.vel_acc,
            hdg_acc: frame.hdg_acc,
            yaw: known_yaw(frame.yaw),
        }
    }
}

impl RawGpsFix {
    pub fn latitude_deg(&self) -> f64 {
        f64::from(self.lat) / DEGREES_E7
    }

    pub fn longitude_deg(&self) -> f64 {
        f64::from(self.lon) / DEGREES_E7
    }

    /// Altitude above MSL in metres
    pub fn altitude_m(&self) -> f64 {
        f64::from(self.alt) / 1000.0
    }

    pub fn hdop(&self) -> Option<f64> {
        self.eph.map(|v| f64::from(v) / 100.0)
    }

    pub fn vdop(&self) -> Option<f64> {
        self.epv.map(|v| f64::from(v) / 100.0)
    }

    pub fn ground_speed_mps(&self) -> Option<f64> {
        self.vel.map(|v| f64::from(v) / 100.0)
    }

    pub fn course_deg(&self) -> Option<f64> {
        self.cog.map(|v| f64::from(v) / 100.0)
    }
}
