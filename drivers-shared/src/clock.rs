//! CPU clock selection for the nRF9E5.
//!
//! The nRF9E5 derives its CPU clock from the radio crystal. The divider lives
//! in CKLFCON and is mirrored into byte 9 of the RF configuration, so the same
//! encoding is used for both. Only five CPU clock rates can be produced; any
//! other `F_CPU` is a build error when the value is derived in a `const`:
//!
//! ```
//! use drivers_shared::clock::cklfcon_for;
//! const CKLFCON: u8 = cklfcon_for(4_000_000);
//! assert_eq!(CKLFCON, 0x20);
//! ```
//!
//! ```compile_fail
//! use drivers_shared::clock::cklfcon_for;
//! const CKLFCON: u8 = cklfcon_for(8_000_000);
//! ```

use modular_bitfield::prelude::*;

use crate::Error;

/// Write RF configuration, low nibble is the start address.
pub const W_RF_CONFIG: u8 = 0x00;
/// RF configuration byte that carries the clock and CRC settings.
pub const RF_CONFIG_CLOCK_BYTE: u8 = 9;

/// TICK_DV value for a 31.25 ms tick of the low-frequency clock.
pub const TICK_DV_31_25_MS: u8 = 124;

// Bit positions in CKLFCON / RF config byte 9.
const UP_CLK_FREQ: u8 = 0;
const XO_DIRECT: u8 = 2;
const XOF: u8 = 3;

const UP_CLK_FREQ_4MHZ: u8 = 0x00;
const UP_CLK_FREQ_2MHZ: u8 = 0x01;
const UP_CLK_FREQ_1MHZ: u8 = 0x02;
const UP_CLK_FREQ_500KHZ: u8 = 0x03;

const XO_DIRECT_UP_CLK: u8 = 0x00;
const XO_DIRECT_XOF: u8 = 0x01;

/// The boards carry a 20 MHz crystal.
const XOF_20MHZ: u8 = 0x04;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CpuClock {
    /// Crystal routed directly to the CPU.
    Mhz20,
    Mhz4,
    Mhz2,
    Mhz1,
    Khz500,
}

impl CpuClock {
    pub const ALL: [CpuClock; 5] = [
        CpuClock::Mhz20,
        CpuClock::Mhz4,
        CpuClock::Mhz2,
        CpuClock::Mhz1,
        CpuClock::Khz500,
    ];

    pub const fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            20_000_000 => Some(CpuClock::Mhz20),
            4_000_000 => Some(CpuClock::Mhz4),
            2_000_000 => Some(CpuClock::Mhz2),
            1_000_000 => Some(CpuClock::Mhz1),
            500_000 => Some(CpuClock::Khz500),
            _ => None,
        }
    }

    pub fn try_from_hz(hz: u32) -> Result<Self, Error> {
        Self::from_hz(hz).ok_or(Error::InvalidCpuClock(hz))
    }

    pub const fn hz(self) -> u32 {
        match self {
            CpuClock::Mhz20 => 20_000_000,
            CpuClock::Mhz4 => 4_000_000,
            CpuClock::Mhz2 => 2_000_000,
            CpuClock::Mhz1 => 1_000_000,
            CpuClock::Khz500 => 500_000,
        }
    }

    pub const fn cklfcon(self) -> u8 {
        let (xo_direct, up_clk_freq) = match self {
            CpuClock::Mhz20 => (XO_DIRECT_XOF, UP_CLK_FREQ_4MHZ),
            CpuClock::Mhz4 => (XO_DIRECT_UP_CLK, UP_CLK_FREQ_4MHZ),
            CpuClock::Mhz2 => (XO_DIRECT_UP_CLK, UP_CLK_FREQ_2MHZ),
            CpuClock::Mhz1 => (XO_DIRECT_UP_CLK, UP_CLK_FREQ_1MHZ),
            CpuClock::Khz500 => (XO_DIRECT_UP_CLK, UP_CLK_FREQ_500KHZ),
        };
        (xo_direct << XO_DIRECT) | (up_clk_freq << UP_CLK_FREQ) | (XOF_20MHZ << XOF)
    }
}

/// CKLFCON value for a CPU clock given in Hz. Panics for unsupported rates,
/// which aborts compilation when evaluated in a `const` item.
pub const fn cklfcon_for(hz: u32) -> u8 {
    match CpuClock::from_hz(hz) {
        Some(clock) => clock.cklfcon(),
        None => panic!("INVALID F_CPU value"),
    }
}

#[derive(BitfieldSpecifier, Copy, Clone, Debug, PartialEq, Eq)]
#[bits = 1]
pub enum CrcMode {
    Crc8 = 0,
    Crc16 = 1,
}

/// RF configuration byte 9 of the nRF9E5.
#[bitfield]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RfClockConfig {
    pub up_clk_freq: B2,
    pub xo_direct: bool,
    pub xof: B3,
    pub crc_en: bool,
    pub crc_mode: CrcMode,
}

impl RfClockConfig {
    /// The value the 10 mm module writes at start-up: clock settings with
    /// 16 bit CRC enabled.
    pub fn for_clock(clock: CpuClock) -> Self {
        Self::from_bytes([clock.cklfcon()])
            .with_crc_en(true)
            .with_crc_mode(CrcMode::Crc16)
    }

    pub fn byte(self) -> u8 {
        self.into_bytes()[0]
    }

    /// SPI frame writing this byte into the RF configuration.
    pub fn write_command(self) -> [u8; 2] {
        [W_RF_CONFIG | RF_CONFIG_CLOCK_BYTE, self.byte()]
    }
}
