#![cfg_attr(target_arch = "avr", no_std)]

pub mod adxl345;
pub mod board;
pub mod boards;
pub mod clock;
pub mod pins;
pub mod sleep;
pub mod spi;
#[cfg(test)]
mod testing;

pub use num_enum;

use core::fmt;

use board::Mcu;
use pins::{PinId, Signal};

/// Set bit `n`, the way register values are written down in the datasheets.
pub const fn bit(n: u8) -> u8 {
    1 << n
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// CPU clock rate without a CKLFCON encoding.
    InvalidCpuClock(u32),
    UnknownBoard,
    /// Two signals of one board are bound to the same pin.
    PinConflict {
        pin: PinId,
        first: Signal,
        second: Signal,
    },
    /// A peripheral, LED or power pin that is missing from the board's pin table.
    UnlistedPin(PinId),
    /// The underlying pin driver reported an error.
    Pin,
    /// The device answered with an unexpected id.
    DeviceId { expected: u8, found: u8 },
    /// The board's MCU cannot be driven by this backend.
    UnsupportedMcu(Mcu),
    /// The driver context was already handed out.
    AlreadyTaken,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCpuClock(hz) => write!(f, "invalid F_CPU value: {} Hz", hz),
            Error::UnknownBoard => f.write_str("unknown board"),
            Error::PinConflict { pin, first, second } => write!(
                f,
                "pin {} bound to both {:?} and {:?}",
                pin, first, second
            ),
            Error::UnlistedPin(pin) => write!(f, "pin {} is not in the board pin table", pin),
            Error::Pin => f.write_str("pin driver error"),
            Error::DeviceId { expected, found } => write!(
                f,
                "unexpected device id 0x{:02x} (expected 0x{:02x})",
                found, expected
            ),
            Error::UnsupportedMcu(mcu) => write!(f, "unsupported MCU {:?}", mcu),
            Error::AlreadyTaken => f.write_str("driver context already taken"),
        }
    }
}
