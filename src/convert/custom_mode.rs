//! PX4 custom mode decoding
//!
//! For PX4 the 32-bit `custom_mode` word packs two bytes:
//!
//! ```text
//!  31        24 23        16 15                     0
//! +------------+------------+------------------------+
//! |  sub mode  | main mode  |        reserved        |
//! +------------+------------+------------------------+
//! ```
//!
//! The sub mode byte has no meaning on its own. Its numbering depends on
//! the main mode:
//!
//! | main mode | PX4 sub mode numbering | schema value |
//! |-----------|------------------------|--------------|
//! | AUTO      | 1-based (READY = 1)    | same value   |
//! | POSCTL    | 0-based (POSCTL = 0)   | value + 10   |
//! | other     | n/a                    | UNSPECIFIED  |
//!
//! Every other autopilot gets both fields UNSPECIFIED.

use serde::Serialize;

use super::enums::MavAutopilot;

const MAIN_MODE_SHIFT: u32 = 16;
const SUB_MODE_SHIFT: u32 = 24;

/// First schema value of the POSCTL sub-mode block
pub const POSCTL_SUB_MODE_BASE: u8 = 10;

/// PX4 main flight mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainMode {
    #[default]
    Unspecified = 0,
    Manual = 1,
    Altctl = 2,
    Posctl = 3,
    Auto = 4,
    Acro = 5,
    Offboard = 6,
    Stabilized = 7,
    Rattitude = 8,
    Simple = 9,
    Termination = 10,
}

impl MainMode {
    /// Map a PX4 main mode byte
    pub fn from_px4(raw: u8) -> Self {
        match raw {
            1 => MainMode::Manual,
            2 => MainMode::Altctl,
            3 => MainMode::Posctl,
            4 => MainMode::Auto,
            5 => MainMode::Acro,
            6 => MainMode::Offboard,
            7 => MainMode::Stabilized,
            8 => MainMode::Rattitude,
            9 => MainMode::Simple,
            10 => MainMode::Termination,
            _ => MainMode::Unspecified,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MainMode::Unspecified => "UNSPECIFIED",
            MainMode::Manual => "MANUAL",
            MainMode::Altctl => "ALTCTL",
            MainMode::Posctl => "POSCTL",
            MainMode::Auto => "AUTO",
            MainMode::Acro => "ACRO",
            MainMode::Offboard => "OFFBOARD",
            MainMode::Stabilized => "STABILIZED",
            MainMode::Rattitude => "RATTITUDE",
            MainMode::Simple => "SIMPLE",
            MainMode::Termination => "TERMINATION",
        }
    }
}

impl std::fmt::Display for MainMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// PX4 sub mode, qualified by the main mode it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubMode {
    #[default]
    Unspecified = 0,
    AutoReady = 1,
    AutoTakeoff = 2,
    AutoLoiter = 3,
    AutoMission = 4,
    AutoRtl = 5,
    AutoLand = 6,
    AutoRtgs = 7,
    AutoFollowTarget = 8,
    AutoPrecland = 9,
    PosctlPosctl = 10,
    PosctlOrbit = 11,
    PosctlSlow = 12,
}

impl SubMode {
    /// Map a sub mode byte reported while in AUTO (1-based)
    pub fn from_px4_auto(raw: u8) -> Self {
        match raw {
            1 => SubMode::AutoReady,
            2 => SubMode::AutoTakeoff,
            3 => SubMode::AutoLoiter,
            4 => SubMode::AutoMission,
            5 => SubMode::AutoRtl,
            6 => SubMode::AutoLand,
            7 => SubMode::AutoRtgs,
            8 => SubMode::AutoFollowTarget,
            9 => SubMode::AutoPrecland,
            _ => SubMode::Unspecified,
        }
    }

    /// Map a sub mode byte reported while in POSCTL (0-based)
    pub fn from_px4_posctl(raw: u8) -> Self {
        match raw.checked_add(POSCTL_SUB_MODE_BASE) {
            Some(10) => SubMode::PosctlPosctl,
            Some(11) => SubMode::PosctlOrbit,
            Some(12) => SubMode::PosctlSlow,
            _ => SubMode::Unspecified,
        }
    }

    /// Interpret a sub mode byte under the given main mode
    pub fn from_px4(main: MainMode, raw: u8) -> Self {
        match main {
            MainMode::Auto => Self::from_px4_auto(raw),
            MainMode::Posctl => Self::from_px4_posctl(raw),
            _ => SubMode::Unspecified,
        }
    }

    /// Short name, without the main mode prefix
    pub fn name(self) -> &'static str {
        match self {
            SubMode::Unspecified => "UNSPECIFIED",
            SubMode::AutoReady => "READY",
            SubMode::AutoTakeoff => "TAKEOFF",
            SubMode::AutoLoiter => "LOITER",
            SubMode::AutoMission => "MISSION",
            SubMode::AutoRtl => "RTL",
            SubMode::AutoLand => "LAND",
            SubMode::AutoRtgs => "RTGS",
            SubMode::AutoFollowTarget => "FOLLOW_TARGET",
            SubMode::AutoPrecland => "PRECLAND",
            SubMode::PosctlPosctl => "POSCTL",
            SubMode::PosctlOrbit => "ORBIT",
            SubMode::PosctlSlow => "SLOW",
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for SubMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded `custom_mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct CustomMode {
    pub main_mode: MainMode,
    pub sub_mode: SubMode,
}

impl CustomMode {
    pub const UNSPECIFIED: CustomMode = CustomMode {
        main_mode: MainMode::Unspecified,
        sub_mode: SubMode::Unspecified,
    };

    /// Decode a custom mode word reported by `autopilot`
    pub fn decode(raw: u32, autopilot: MavAutopilot) -> Self {
        if autopilot.is_px4() {
            Self::from_px4(raw)
        } else {
            Self::UNSPECIFIED
        }
    }

    /// Decode a custom mode word known to come from PX4
    pub fn from_px4(raw: u32) -> Self {
        let (main_raw, sub_raw) = split_px4(raw);
        let main_mode = MainMode::from_px4(main_raw);

        Self {
            main_mode,
            sub_mode: SubMode::from_px4(main_mode, sub_raw),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        *self == Self::UNSPECIFIED
    }
}

impl std::fmt::Display for CustomMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.main_mode, self.sub_mode)
    }
}

fn split_px4(raw: u32) -> (u8, u8) {
    (
        ((raw >> MAIN_MODE_SHIFT) & 0xFF) as u8,
        ((raw >> SUB_MODE_SHIFT) & 0xFF) as u8,
    )
}

/// Diagnostic breakdown of a PX4 custom mode word
///
/// Keeps the raw bytes next to the decoded names, for logs and monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Px4CustomMode {
    pub raw: u32,
    pub main_raw: u8,
    pub sub_raw: u8,
    pub mode: CustomMode,
}

impl Px4CustomMode {
    pub fn new(raw: u32) -> Self {
        let (main_raw, sub_raw) = split_px4(raw);

        Self {
            raw,
            main_raw,
            sub_raw,
            mode: CustomMode::from_px4(raw),
        }
    }
}

impl std::fmt::Display for Px4CustomMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:#010x} main={:#04x} ({}) sub={:#04x} ({})",
            self.raw, self.main_raw, self.mode.main_mode, self.sub_raw, self.mode.sub_mode
        )
    }
}
