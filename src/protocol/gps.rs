//! GPS_RAW_INT payload
//!
//! The first 30 bytes are the MAVLink 1 layout (sorted by field size).
//! MAVLink 2 appends 22 bytes of extension fields in declaration order:
//!
//! ```text
//! base:       time_usec(8) lat(4) lon(4) alt(4) eph(2) epv(2) vel(2) cog(2) fix_type(1) satellites(1)
//! extensions: alt_ellipsoid(4) h_acc(4) v_acc(4) vel_acc(4) hdg_acc(4) yaw(2)
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::constants::GPS_RAW_INT_PAYLOAD_LEN;
use super::frame::zero_extended;

/// Undecoded GPS_RAW_INT fields, exactly as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GpsRawIntFrame {
    /// Timestamp (UNIX epoch or time since boot), microseconds
    pub time_usec: u64,
    /// Latitude, degrees * 1e7
    pub lat: i32,
    /// Longitude, degrees * 1e7
    pub lon: i32,
    /// Altitude above MSL, millimeters
    pub alt: i32,
    /// HDOP * 100, 65535 if unknown
    pub eph: u16,
    /// VDOP * 100, 65535 if unknown
    pub epv: u16,
    /// Ground speed in cm/s, 65535 if unknown
    pub vel: u16,
    /// Course over ground in centidegrees, 65535 if unknown
    pub cog: u16,
    /// GPS_FIX_TYPE
    pub fix_type: u8,
    /// Visible satellites, 255 if unknown
    pub satellites_visible: u8,
    /// Altitude above the WGS84 ellipsoid, millimeters
    pub alt_ellipsoid: i32,
    /// Horizontal position uncertainty, millimeters
    pub h_acc: u32,
    /// Vertical position uncertainty, millimeters
    pub v_acc: u32,
    /// Speed uncertainty, mm/s
    pub vel_acc: u32,
    /// Heading uncertainty, degE5
    pub hdg_acc: u32,
    /// Yaw in centidegrees relative to north, 0 if not available
    pub yaw: u16,
}

impl GpsRawIntFrame {
    /// Decode a GPS_RAW_INT payload.
    ///
    /// A 30-byte MAVLink 1 payload decodes with zeroed extension fields.
    pub fn decode(payload: &[u8]) -> Self {
        let raw = zero_extended::<GPS_RAW_INT_PAYLOAD_LEN>(payload);
        let mut data = &raw[..];

        let time_usec = data.get_u64_le();
        let lat = data.get_i32_le();
        let lon = data.get_i32_le();
        let alt = data.get_i32_le();
        let eph = data.get_u16_le();
        let epv = data.get_u16_le();
        let vel = data.get_u16_le();
        let cog = data.get_u16_le();
        let fix_type = data.get_u8();
        let satellites_visible = data.get_u8();
        let alt_ellipsoid = data.get_i32_le();
        let h_acc = data.get_u32_le();
        let v_acc = data.get_u32_le();
        let vel_acc = data.get_u32_le();
        let hdg_acc = data.get_u32_le();
        let yaw = data.get_u16_le();

        Self {
            time_usec,
            lat,
            lon,
            alt,
            eph,
            epv,
            vel,
            cog,
            fix_type,
            satellites_visible,
            alt_ellipsoid,
            h_acc,
            v_acc,
            vel_acc,
            hdg_acc,
            yaw,
        }
    }

    /// Encode to a full-length MAVLink 2 payload (extensions included)
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(GPS_RAW_INT_PAYLOAD_LEN);
        buf.put_u64_le(self.time_usec);
        buf.put_i32_le(self.lat);
        buf.put_i32_le(self.lon);
        buf.put_i32_le(self.alt);
        buf.put_u16_le(self.eph);
        buf.put_u16_le(self.epv);
        buf.put_u16_le(self.vel);
        buf.put_u16_le(self.cog);
        buf.put_u8(self.fix_type);
        buf.put_u8(self.satellites_visible);
        buf.put_i32_le(self.alt_ellipsoid);
        buf.put_u32_le(self.h_acc);
        buf.put_u32_le(self.v_acc);
        buf.put_u32_le(self.vel_acc);
        buf.put_u32_le(self.hdg_acc);
        buf.put_u16_le(self.yaw);
        buf.freeze()
    }
}
