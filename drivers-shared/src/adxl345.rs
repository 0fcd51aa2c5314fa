//! ADXL345 three axis accelerometer.
//!
//! The driver only needs byte-wide register access, so it runs on top of the
//! bit-banged [`SensorSpi`](crate::spi::SensorSpi) as well as on a hardware
//! bus.

use modular_bitfield::prelude::*;

use crate::{bit, spi::RegisterAccess, Error};

pub const DEVICE_ID: u8 = 0xE5;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, num_enum::TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    DevId = 0x00,
    ThreshTap = 0x1D,
    OfsX = 0x1E,
    OfsY = 0x1F,
    OfsZ = 0x20,
    Dur = 0x21,
    Latent = 0x22,
    Window = 0x23,
    ThreshAct = 0x24,
    ThreshInact = 0x25,
    TimeInact = 0x26,
    ActInactCtl = 0x27,
    ThreshFf = 0x28,
    TimeFf = 0x29,
    TapAxes = 0x2A,
    ActTapStatus = 0x2B,
    BwRate = 0x2C,
    PowerCtl = 0x2D,
    IntEnable = 0x2E,
    IntMap = 0x2F,
    IntSource = 0x30,
    DataFormat = 0x31,
    DataX0 = 0x32,
    DataX1 = 0x33,
    DataY0 = 0x34,
    DataY1 = 0x35,
    DataZ0 = 0x36,
    DataZ1 = 0x37,
    FifoCtl = 0x38,
    FifoStatus = 0x39,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Registers the device ignores writes to.
    pub const fn is_read_only(self) -> bool {
        matches!(
            self,
            Register::DevId
                | Register::ActTapStatus
                | Register::IntSource
                | Register::DataX0
                | Register::DataX1
                | Register::DataY0
                | Register::DataY1
                | Register::DataZ0
                | Register::DataZ1
                | Register::FifoStatus
        )
    }
}

/// POWER_CTL values.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    Standby = 0x04,
    Measure = 0x08,
    /// Measurement at reduced rate, wakes up on activity.
    Sleep = 0x0C,
}

#[derive(BitfieldSpecifier, Copy, Clone, Debug, PartialEq, Eq)]
#[bits = 2]
pub enum Range {
    G2 = 0,
    G4 = 1,
    G8 = 2,
    G16 = 3,
}

#[bitfield]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DataFormat {
    pub range: Range,
    /// Left justified (MSB) mode.
    pub justify: bool,
    /// Constant 4 mg/LSB instead of 10 bit output.
    pub full_res: bool,
    #[skip]
    __: B1,
    /// Interrupts are active low.
    pub int_invert: bool,
    /// Three wire SPI.
    pub spi_3wire: bool,
    pub self_test: bool,
}

impl DataFormat {
    pub fn byte(self) -> u8 {
        self.into_bytes()[0]
    }
}

/// ACT_INACT_CTL bits.
pub mod activity {
    use crate::bit;

    /// AC coupled activity detection.
    pub const ACT_AC: u8 = bit(7);
    pub const ACT_X: u8 = bit(6);
    pub const ACT_Y: u8 = bit(5);
    pub const ACT_Z: u8 = bit(4);
    pub const INACT_AC: u8 = bit(3);
    pub const INACT_X: u8 = bit(2);
    pub const INACT_Y: u8 = bit(1);
    pub const INACT_Z: u8 = bit(0);

    /// AC coupled activity on all three axes.
    pub const AC_3AXIS: u8 = ACT_AC | ACT_X | ACT_Y | ACT_Z;
}

/// INT_ENABLE / INT_MAP / INT_SOURCE bits.
pub mod int {
    use crate::bit;

    pub const DATA_READY: u8 = bit(7);
    pub const SINGLE_TAP: u8 = bit(6);
    pub const DOUBLE_TAP: u8 = bit(5);
    pub const ACTIVITY: u8 = bit(4);
    pub const INACTIVITY: u8 = bit(3);
    pub const FREE_FALL: u8 = bit(2);
    pub const WATERMARK: u8 = bit(1);
    pub const OVERRUN: u8 = bit(0);
}

/// Activity interrupt setup for [`Adxl345::configure_activity_detection`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActivityConfig {
    pub format: DataFormat,
    /// 62.5 mg/LSB.
    pub threshold: u8,
    /// ACT_INACT_CTL value, see [`activity`].
    pub axes: u8,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            format: DataFormat::new().with_full_res(true),
            threshold: 0x10,
            axes: activity::AC_3AXIS,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

pub struct Adxl345<B> {
    bus: B,
}

impl<B: RegisterAccess> Adxl345<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    fn write(&mut self, reg: Register, value: u8) -> Result<(), Error> {
        self.bus.write_register(reg.addr(), value)
    }

    fn read(&mut self, reg: Register) -> Result<u8, Error> {
        self.bus.read_register(reg.addr())
    }

    pub fn device_id(&mut self) -> Result<u8, Error> {
        self.read(Register::DevId)
    }

    pub fn check_device_id(&mut self) -> Result<(), Error> {
        let found = self.device_id()?;
        if found != DEVICE_ID {
            log::warn!("adxl345: unexpected device id {:#x}", found);
            return Err(Error::DeviceId {
                expected: DEVICE_ID,
                found,
            });
        }
        Ok(())
    }

    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Error> {
        self.write(Register::PowerCtl, mode as u8)
    }

    pub fn set_data_format(&mut self, format: DataFormat) -> Result<(), Error> {
        self.write(Register::DataFormat, format.byte())
    }

    /// Puts the device to sleep with the activity interrupt routed to INT2, so
    /// that motion wakes up the MCU.
    pub fn configure_activity_detection(&mut self, config: ActivityConfig) -> Result<(), Error> {
        self.set_power_mode(PowerMode::Standby)?;
        self.write(Register::IntEnable, 0)?;
        self.set_power_mode(PowerMode::Standby)?;

        self.set_data_format(config.format)?;
        self.write(Register::ThreshAct, config.threshold)?;
        self.write(Register::ActInactCtl, config.axes)?;

        // A set INT_MAP bit sends the interrupt to INT2.
        self.write(Register::IntMap, bit(3))?;
        self.write(Register::IntEnable, int::ACTIVITY)?;

        let pending = self.interrupt_source()?;
        log::debug!("adxl345: activity detection armed, cleared {:#x}", pending);

        self.set_power_mode(PowerMode::Sleep)
    }

    /// Reads INT_SOURCE, which clears the latched interrupts.
    pub fn interrupt_source(&mut self) -> Result<u8, Error> {
        self.read(Register::IntSource)
    }

    pub fn reading(&mut self) -> Result<Reading, Error> {
        let mut buf = [0u8; 6];
        self.bus.read_registers(Register::DataX0.addr(), &mut buf)?;
        Ok(Reading {
            x: i16::from_le_bytes([buf[0], buf[1]]),
            y: i16::from_le_bytes([buf[2], buf[3]]),
            z: i16::from_le_bytes([buf[4], buf[5]]),
        })
    }

    pub fn release(self) -> B {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Register file that records every write.
    struct Regs {
        file: [u8; 64],
        writes: Vec<(u8, u8)>,
        reads: Vec<u8>,
    }

    impl Regs {
        fn new() -> Self {
            let mut file = [0; 64];
            file[0] = DEVICE_ID;
            Self {
                file,
                writes: Vec::new(),
                reads: Vec::new(),
            }
        }
    }

    impl RegisterAccess for Regs {
        fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error> {
            self.writes.push((address, value));
            self.file[address as usize] = value;
            Ok(())
        }

        fn read_register(&mut self, address: u8) -> Result<u8, Error> {
            self.reads.push(address);
            Ok(self.file[address as usize])
        }
    }

    #[test]
    fn device_id_check() {
        let mut accel = Adxl345::new(Regs::new());
        assert_eq!(accel.check_device_id(), Ok(()));

        let mut regs = Regs::new();
        regs.file[0] = 0xff;
        let mut accel = Adxl345::new(regs);
        assert_eq!(
            accel.check_device_id(),
            Err(Error::DeviceId {
                expected: 0xe5,
                found: 0xff
            })
        );
    }

    #[test]
    fn data_format_layout() {
        let full = DataFormat::new().with_full_res(true);
        assert_eq!(full.byte(), 0x08);
        let f = DataFormat::new()
            .with_range(Range::G16)
            .with_int_invert(true);
        assert_eq!(f.byte(), 0x23);
    }

    #[test]
    fn activity_detection_sequence() {
        let mut accel = Adxl345::new(Regs::new());
        accel
            .configure_activity_detection(ActivityConfig::default())
            .unwrap();
        let regs = accel.release();
        assert_eq!(
            regs.writes,
            [
                (0x2D, 0x04),
                (0x2E, 0x00),
                (0x2D, 0x04),
                (0x31, 0x08),
                (0x24, 0x10),
                (0x27, 0xF0),
                (0x2F, 0x08),
                (0x2E, 0x10),
                (0x2D, 0x0C),
            ]
        );
        assert_eq!(regs.reads, [0x30]);
    }

    #[test]
    fn axes_are_little_endian() {
        let mut regs = Regs::new();
        regs.file[0x32..0x38].copy_from_slice(&[0x34, 0x12, 0xff, 0xff, 0x00, 0x01]);
        let mut accel = Adxl345::new(regs);
        assert_eq!(
            accel.reading().unwrap(),
            Reading {
                x: 0x1234,
                y: -1,
                z: 256
            }
        );
    }

    #[test]
    fn register_map() {
        assert_eq!(Register::try_from(0x31).ok(), Some(Register::DataFormat));
        assert!(Register::try_from(0x01).is_err());
        assert!(Register::IntSource.is_read_only());
        assert!(!Register::PowerCtl.is_read_only());
    }
}
