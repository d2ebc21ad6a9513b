//! MAV_MODE_FLAG bitfield
//!
//! ```text
//!  bit:   7       6        5    4     3      2     1     0
//!      +-------+--------+-----+-----+------+------+------+--------+
//!      | armed | manual | hil | stab| guid | auto | test | custom |
//!      +-------+--------+-----+-----+------+------+------+--------+
//! ```

use serde::Serialize;

pub const MODE_FLAG_CUSTOM_MODE_ENABLED: u8 = 0x01;
pub const MODE_FLAG_TEST_ENABLED: u8 = 0x02;
pub const MODE_FLAG_AUTO_ENABLED: u8 = 0x04;
pub const MODE_FLAG_GUIDED_ENABLED: u8 = 0x08;
pub const MODE_FLAG_STABILIZE_ENABLED: u8 = 0x10;
pub const MODE_FLAG_HIL_ENABLED: u8 = 0x20;
pub const MODE_FLAG_MANUAL_INPUT_ENABLED: u8 = 0x40;
pub const MODE_FLAG_SAFETY_ARMED: u8 = 0x80;

/// Decoded heartbeat `base_mode`, one boolean per bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct BaseMode {
    pub custom_mode_enabled: bool,
    pub test_enabled: bool,
    pub auto_enabled: bool,
    pub guided_enabled: bool,
    pub stabilize_enabled: bool,
    pub hil_enabled: bool,
    pub manual_input_enabled: bool,
    pub safety_armed: bool,
}

impl BaseMode {
    /// Split a mode byte into its flags
    pub fn from_bits(bits: u8) -> Self {
        let set = |mask: u8| bits & mask != 0;

        Self {
            custom_mode_enabled: set(MODE_FLAG_CUSTOM_MODE_ENABLED),
            test_enabled: set(MODE_FLAG_TEST_ENABLED),
            auto_enabled: set(MODE_FLAG_AUTO_ENABLED),
            guided_enabled: set(MODE_FLAG_GUIDED_ENABLED),
            stabilize_enabled: set(MODE_FLAG_STABILIZE_ENABLED),
            hil_enabled: set(MODE_FLAG_HIL_ENABLED),
            manual_input_enabled: set(MODE_FLAG_MANUAL_INPUT_ENABLED),
            safety_armed: set(MODE_FLAG_SAFETY_ARMED),
        }
    }

    /// Pack the flags back into a mode byte
    pub fn bits(&self) -> u8 {
        let flag = |on: bool, mask: u8| if on { mask } else { 0 };

        flag(self.custom_mode_enabled, MODE_FLAG_CUSTOM_MODE_ENABLED)
            | flag(self.test_enabled, MODE_FLAG_TEST_ENABLED)
            | flag(self.auto_enabled, MODE_FLAG_AUTO_ENABLED)
            | flag(self.guided_enabled, MODE_FLAG_GUIDED_ENABLED)
            | flag(self.stabilize_enabled, MODE_FLAG_STABILIZE_ENABLED)
            | flag(self.hil_enabled, MODE_FLAG_HIL_ENABLED)
            | flag(self.manual_input_enabled, MODE_FLAG_MANUAL_INPUT_ENABLED)
            | flag(self.safety_armed, MODE_FLAG_SAFETY_ARMED)
    }

    pub fn is_armed(&self) -> bool {
        self.safety_armed
    }
}

impl From<u8> for BaseMode {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_every_byte() {
        for bits in 0..=u8::MAX {
            assert_eq!(BaseMode::from_bits(bits).bits(), bits, "bits={:#04x}", bits);
        }
    }

    #[test]
    fn test_each_bit_maps_to_one_flag() {
        let single = |mode: BaseMode| {
            [
                mode.custom_mode_enabled,
                mode.test_enabled,
                mode.auto_enabled,
                mode.guided_enabled,
                mode.stabilize_enabled,
                mode.hil_enabled,
                mode.manual_input_enabled,
                mode.safety_armed,
            ]
        };

        for bit in 0..8 {
            let flags = single(BaseMode::from_bits(1 << bit));
            for (i, on) in flags.iter().enumerate() {
                assert_eq!(*on, i == bit, "bit {} flag {}", bit, i);
            }
        }
    }

    #[test]
    fn test_armed_custom() {
        let mode = BaseMode::from_bits(0b1000_0001);
        assert!(mode.custom_mode_enabled);
        assert!(mode.is_armed());
        assert_eq!(
            mode,
            BaseMode {
                custom_mode_enabled: true,
                safety_armed: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_zero() {
        assert_eq!(BaseMode::from(0), BaseMode::default());
    }
}
