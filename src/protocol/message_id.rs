//! MAVLink common-dialect message IDs
//!
//! Only the messages a PX4 or ArduPilot vehicle streams by default are
//! named here. The bridge converts HEARTBEAT and GPS_RAW_INT; the rest
//! exist so skipped frames can be logged by name.

/// Well-known MAVLink message ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    Heartbeat = 0,
    SysStatus = 1,
    SystemTime = 2,
    Ping = 4,
    ParamValue = 22,
    GpsRawInt = 24,
    GpsStatus = 25,
    ScaledImu = 26,
    RawImu = 27,
    ScaledPressure = 29,
    Attitude = 30,
    AttitudeQuaternion = 31,
    LocalPositionNed = 32,
    GlobalPositionInt = 33,
    RcChannelsRaw = 35,
    ServoOutputRaw = 36,
    MissionCurrent = 42,
    NavControllerOutput = 62,
    RcChannels = 65,
    VfrHud = 74,
    CommandLong = 76,
    CommandAck = 77,
    AttitudeTarget = 83,
    PositionTargetLocalNed = 85,
    PositionTargetGlobalInt = 87,
    HighresImu = 105,
    Timesync = 111,
    ScaledImu2 = 116,
    AltitudeMsg = 141,
    BatteryStatus = 147,
    AutopilotVersion = 148,
    EstimatorStatus = 230,
    Vibration = 241,
    HomePosition = 242,
    ExtendedSysState = 245,
    Statustext = 253,
    UtmGlobalPosition = 340,
    OpenDroneIdLocation = 12901,
}

impl MessageId {
    /// Look up a raw message ID
    pub fn from_raw(id: u32) -> Option<Self> {
        let known = match id {
            0 => MessageId::Heartbeat,
            1 => MessageId::SysStatus,
            2 => MessageId::SystemTime,
            4 => MessageId::Ping,
            22 => MessageId::ParamValue,
            24 => MessageId::GpsRawInt,
            25 => MessageId::GpsStatus,
            26 => MessageId::ScaledImu,
            27 => MessageId::RawImu,
            29 => MessageId::ScaledPressure,
            30 => MessageId::Attitude,
            31 => MessageId::AttitudeQuaternion,
            32 => MessageId::LocalPositionNed,
            33 => MessageId::GlobalPositionInt,
            35 => MessageId::RcChannelsRaw,
            36 => MessageId::ServoOutputRaw,
            42 => MessageId::MissionCurrent,
            62 => MessageId::NavControllerOutput,
            65 => MessageId::RcChannels,
            74 => MessageId::VfrHud,
            76 => MessageId::CommandLong,
            77 => MessageId::CommandAck,
            83 => MessageId::AttitudeTarget,
            85 => MessageId::PositionTargetLocalNed,
            87 => MessageId::PositionTargetGlobalInt,
            105 => MessageId::HighresImu,
            111 => MessageId::Timesync,
            116 => MessageId::ScaledImu2,
            141 => MessageId::AltitudeMsg,
            147 => MessageId::BatteryStatus,
            148 => MessageId::AutopilotVersion,
            230 => MessageId::EstimatorStatus,
            241 => MessageId::Vibration,
            242 => MessageId::HomePosition,
            245 => MessageId::ExtendedSysState,
            253 => MessageId::Statustext,
            340 => MessageId::UtmGlobalPosition,
            12901 => MessageId::OpenDroneIdLocation,
            _ => return None,
        };
        Some(known)
    }

    /// Numeric message ID
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Canonical MAVLink name
    pub fn name(self) -> &'static str {
        match self {
            MessageId::Heartbeat => "HEARTBEAT",
            MessageId::SysStatus => "SYS_STATUS",
            MessageId::SystemTime => "SYSTEM_TIME",
            MessageId::Ping => "PING",
            MessageId::ParamValue => "PARAM_VALUE",
            MessageId::GpsRawInt => "GPS_RAW_INT",
            MessageId::GpsStatus => "GPS_STATUS",
            MessageId::ScaledImu => "SCALED_IMU",
            MessageId::RawImu => "RAW_IMU",
            MessageId::ScaledPressure => "SCALED_PRESSURE",
            MessageId::Attitude => "ATTITUDE",
            MessageId::AttitudeQuaternion => "ATTITUDE_QUATERNION",
            MessageId::LocalPositionNed => "LOCAL_POSITION_NED",
            MessageId::GlobalPositionInt => "GLOBAL_POSITION_INT",
            MessageId::RcChannelsRaw => "RC_CHANNELS_RAW",
            MessageId::ServoOutputRaw => "SERVO_OUTPUT_RAW",
            MessageId::MissionCurrent => "MISSION_CURRENT",
            MessageId::NavControllerOutput => "NAV_CONTROLLER_OUTPUT",
            MessageId::RcChannels => "RC_CHANNELS",
            MessageId::VfrHud => "VFR_HUD",
            MessageId::CommandLong => "COMMAND_LONG",
            MessageId::CommandAck => "COMMAND_ACK",
            MessageId::AttitudeTarget => "ATTITUDE_TARGET",
            MessageId::PositionTargetLocalNed => "POSITION_TARGET_LOCAL_NED",
            MessageId::PositionTargetGlobalInt => "POSITION_TARGET_GLOBAL_INT",
            MessageId::HighresImu => "HIGHRES_IMU",
            MessageId::Timesync => "TIMESYNC",
            MessageId::ScaledImu2 => "SCALED_IMU2",
            MessageId::AltitudeMsg => "ALTITUDE",
            MessageId::BatteryStatus => "BATTERY_STATUS",
            MessageId::AutopilotVersion => "AUTOPILOT_VERSION",
            MessageId::EstimatorStatus => "ESTIMATOR_STATUS",
            MessageId::Vibration => "VIBRATION",
            MessageId::HomePosition => "HOME_POSITION",
            MessageId::ExtendedSysState => "EXTENDED_SYS_STATE",
            MessageId::Statustext => "STATUSTEXT",
            MessageId::UtmGlobalPosition => "UTM_GLOBAL_POSITION",
            MessageId::OpenDroneIdLocation => "OPEN_DRONE_ID_LOCATION",
        }
    }

    /// Name for any raw ID, `"UNKNOWN"` if it is not listed
    pub fn name_of(id: u32) -> &'static str {
        Self::from_raw(id).map_or("UNKNOWN", Self::name)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
