//! Passthrough enumerations
//!
//! These map a raw MAVLink value onto the downstream schema by direct
//! numeric correspondence. Values the schema has no name for survive as
//! `Other(raw)` so nothing is silently rewritten.
//!
//! [`GpsFixType`] is the one exception: the schema reserves 0 for
//! "unspecified", so every MAVLink value is shifted up by one.

use serde::{Serialize, Serializer};

use crate::protocol::MAV_AUTOPILOT_PX4;

macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident($raw:ty) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value with no named variant, carried through unchanged
            Other($raw),
        }

        impl $name {
            /// Map a schema value by direct numeric correspondence
            pub fn from_raw(raw: $raw) -> Self {
                match raw {
                    $( $value => $name::$variant, )+
                    other => $name::Other(other),
                }
            }

            /// Schema value
            pub fn raw(self) -> $raw {
                match self {
                    $( $name::$variant => $value, )+
                    $name::Other(raw) => raw,
                }
            }

            /// Schema name without the enum prefix
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                    $name::Other(_) => "UNKNOWN",
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $name::Other(raw) => write!(f, "UNKNOWN({})", raw),
                    known => write!(f, "{}", known.name()),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $name::Other(raw) => serializer.serialize_u64(u64::from(*raw)),
                    known => serializer.serialize_str(known.name()),
                }
            }
        }
    };
}

schema_enum! {
    /// Vehicle type (MAV_TYPE)
    pub enum MavType(u8) {
        Generic = 0 => "GENERIC",
        FixedWing = 1 => "FIXED_WING",
        Quadrotor = 2 => "QUADROTOR",
        Coaxial = 3 => "COAXIAL",
        Helicopter = 4 => "HELICOPTER",
        AntennaTracker = 5 => "ANTENNA_TRACKER",
        Gcs = 6 => "GCS",
        Airship = 7 => "AIRSHIP",
        FreeBalloon = 8 => "FREE_BALLOON",
        Rocket = 9 => "ROCKET",
        GroundRover = 10 => "GROUND_ROVER",
        SurfaceBoat = 11 => "SURFACE_BOAT",
        Submarine = 12 => "SUBMARINE",
        Hexarotor = 13 => "HEXAROTOR",
        Octorotor = 14 => "OCTOROTOR",
        Tricopter = 15 => "TRICOPTER",
        FlappingWing = 16 => "FLAPPING_WING",
        Kite = 17 => "KITE",
        OnboardController = 18 => "ONBOARD_CONTROLLER",
        VtolTailsitterDuorotor = 19 => "VTOL_TAILSITTER_DUOROTOR",
        VtolTailsitterQuadrotor = 20 => "VTOL_TAILSITTER_QUADROTOR",
        VtolTiltrotor = 21 => "VTOL_TILTROTOR",
        VtolFixedrotor = 22 => "VTOL_FIXEDROTOR",
        VtolTailsitter = 23 => "VTOL_TAILSITTER",
        VtolTiltwing = 24 => "VTOL_TILTWING",
        VtolReserved5 = 25 => "VTOL_RESERVED5",
        Gimbal = 26 => "GIMBAL",
        Adsb = 27 => "ADSB",
        Parafoil = 28 => "PARAFOIL",
        Dodecarotor = 29 => "DODECAROTOR",
        Camera = 30 => "CAMERA",
        ChargingStation = 31 => "CHARGING_STATION",
        Flarm = 32 => "FLARM",
        Servo = 33 => "SERVO",
        Odid = 34 => "ODID",
        Decarotor = 35 => "DECAROTOR",
        Battery = 36 => "BATTERY",
        Parachute = 37 => "PARACHUTE",
        Log = 38 => "LOG",
        Osd = 39 => "OSD",
        Imu = 40 => "IMU",
        Gps = 41 => "GPS",
        Winch = 42 => "WINCH",
        GenericMultirotor = 43 => "GENERIC_MULTIROTOR",
    }
}

schema_enum! {
    /// Autopilot vendor (MAV_AUTOPILOT)
    pub enum MavAutopilot(u8) {
        Generic = 0 => "GENERIC",
        Reserved = 1 => "RESERVED",
        Slugs = 2 => "SLUGS",
        Ardupilotmega = 3 => "ARDUPILOTMEGA",
        Openpilot = 4 => "OPENPILOT",
        GenericWaypointsOnly = 5 => "GENERIC_WAYPOINTS_ONLY",
        GenericWaypointsAndSimpleNavigationOnly = 6 => "GENERIC_WAYPOINTS_AND_SIMPLE_NAVIGATION_ONLY",
        GenericMissionFull = 7 => "GENERIC_MISSION_FULL",
        Invalid = 8 => "INVALID",
        Ppz = 9 => "PPZ",
        Udb = 10 => "UDB",
        Fp = 11 => "FP",
        Px4 = 12 => "PX4",
        Smaccmpilot = 13 => "SMACCMPILOT",
        Autoquad = 14 => "AUTOQUAD",
        Armazila = 15 => "ARMAZILA",
        Aerob = 16 => "AEROB",
        Asluav = 17 => "ASLUAV",
        Smartap = 18 => "SMARTAP",
        Airrails = 19 => "AIRRAILS",
        Reflex = 20 => "REFLEX",
    }
}

impl MavAutopilot {
    /// Whether `custom_mode` follows the PX4 byte-packed layout
    pub fn is_px4(self) -> bool {
        self.raw() == MAV_AUTOPILOT_PX4
    }
}

schema_enum! {
    /// System status (MAV_STATE). MAVLink's UNINIT (0) is the schema's UNSPECIFIED.
    pub enum MavState(u8) {
        Unspecified = 0 => "UNSPECIFIED",
        Boot = 1 => "BOOT",
        Calibrating = 2 => "CALIBRATING",
        Standby = 3 => "STANDBY",
        Active = 4 => "ACTIVE",
        Critical = 5 => "CRITICAL",
        Emergency = 6 => "EMERGENCY",
        Poweroff = 7 => "POWEROFF",
        FlightTermination = 8 => "FLIGHT_TERMINATION",
    }
}

schema_enum! {
    /// GPS fix type in schema numbering (MAVLink GPS_FIX_TYPE + 1)
    pub enum GpsFixType(u32) {
        Unspecified = 0 => "UNSPECIFIED",
        NoGps = 1 => "NO_GPS",
        NoFix = 2 => "NO_FIX",
        Fix2d = 3 => "2D_FIX",
        Fix3d = 4 => "3D_FIX",
        Dgps = 5 => "DGPS",
        RtkFloat = 6 => "RTK_FLOAT",
        RtkFixed = 7 => "RTK_FIXED",
        Static = 8 => "STATIC",
        Ppp = 9 => "PPP",
    }
}

/// Offset between MAVLink GPS_FIX_TYPE and the schema, which keeps 0 free
pub const GPS_FIX_TYPE_OFFSET: u32 = 1;

impl GpsFixType {
    /// Map a MAVLink GPS_FIX_TYPE value (0 = NO_GPS)
    pub fn from_mavlink(raw: u8) -> Self {
        GpsFixType::from_raw(u32::from(raw) + GPS_FIX_TYPE_OFFSET)
    }

    /// Whether the receiver reports at least a 3D fix
    pub fn has_3d_fix(self) -> bool {
        matches!(
            self,
            GpsFixType::Fix3d
                | GpsFixType::Dgps
                | GpsFixType::RtkFloat
                | GpsFixType::RtkFixed
                | GpsFixType::Static
                | GpsFixType::Ppp
        )
    }
}
