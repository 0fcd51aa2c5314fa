//! Low-power modes, in order of decreasing power consumption and increasing
//! wake-up time.

use crate::bit;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, num_enum::TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepMode {
    Idle = 0,
    Light = 1,
    Moderate = 2,
    Deep = 3,
    PowerDown = 4,
}

// ATmega128 MCUCR
const MCUCR_SE: u8 = 5;
const MCUCR_SM1: u8 = 4;
const MCUCR_SM0: u8 = 3;
const MCUCR_SM2: u8 = 2;

/// Mask of the MCUCR bits written by [`SleepMode::avr_mcucr_bits`].
pub const MCUCR_SLEEP_MASK: u8 = bit(MCUCR_SE) | bit(MCUCR_SM2) | bit(MCUCR_SM1) | bit(MCUCR_SM0);

impl SleepMode {
    pub fn avr_name(self) -> &'static str {
        match self {
            SleepMode::Idle => "idle",
            SleepMode::Light => "extended standby",
            SleepMode::Moderate => "standby",
            SleepMode::Deep => "power-save",
            SleepMode::PowerDown => "power-down",
        }
    }

    pub fn nrf_name(self) -> &'static str {
        match self {
            SleepMode::Idle => "idle",
            SleepMode::Light => "light",
            SleepMode::Moderate => "moderate",
            SleepMode::Deep => "standby",
            SleepMode::PowerDown => "deep",
        }
    }

    /// Sleep-mode select and sleep-enable bits for the ATmega128 MCUCR.
    pub const fn avr_mcucr_bits(self) -> u8 {
        let sm = match self {
            SleepMode::Idle => 0,
            SleepMode::Light => bit(MCUCR_SM2) | bit(MCUCR_SM1) | bit(MCUCR_SM0),
            SleepMode::Moderate => bit(MCUCR_SM2) | bit(MCUCR_SM1),
            SleepMode::Deep => bit(MCUCR_SM1) | bit(MCUCR_SM0),
            SleepMode::PowerDown => bit(MCUCR_SM1),
        };
        sm | bit(MCUCR_SE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_enum::TryFromPrimitive;

    #[test]
    fn numbering_matches_depth() {
        assert_eq!(SleepMode::try_from_primitive(0).unwrap(), SleepMode::Idle);
        assert_eq!(SleepMode::try_from_primitive(4).unwrap(), SleepMode::PowerDown);
        assert!(SleepMode::try_from_primitive(5).is_err());
        assert!(SleepMode::Light < SleepMode::Deep);
    }

    #[test]
    fn mcucr_patterns() {
        assert_eq!(SleepMode::Idle.avr_mcucr_bits(), 0x20);
        assert_eq!(SleepMode::PowerDown.avr_mcucr_bits(), 0x30);
        assert_eq!(SleepMode::Deep.avr_mcucr_bits(), 0x38);
        assert_eq!(SleepMode::Moderate.avr_mcucr_bits(), 0x34);
        assert_eq!(SleepMode::Light.avr_mcucr_bits(), 0x3c);
        for mode in [SleepMode::Idle, SleepMode::Light, SleepMode::PowerDown] {
            assert_eq!(mode.avr_mcucr_bits() & !MCUCR_SLEEP_MASK, 0);
        }
    }
}
