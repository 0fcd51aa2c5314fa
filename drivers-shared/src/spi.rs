//! Register access to SPI sensors.
//!
//! [`SensorSpi`] clocks the bus by hand on four GPIOs, which is how the sensor
//! boards reach the ADXL345 (and the ADC and SD card) without the hardware SPI
//! that is reserved for the radio. Frames follow the ADXL345 convention: the
//! first byte carries the register address with the read flag in the MSB, the
//! second byte is the data. Bits go out MSB first, change while SCLK is low and
//! are latched by the device on the rising edge (SPI mode 3).

use embedded_hal::digital::v2::{InputPin, OutputPin, PinState};
use embedded_hal::spi::{Mode, Phase, Polarity};

use crate::{
    board::SpiPins,
    pins::{PortIo, PortPin},
    Error,
};

/// Read flag of the command byte.
pub const READ: u8 = 0x80;
/// Multi-byte flag of the command byte: the device auto-increments the address.
pub const MULTI_BYTE: u8 = 0x40;

/// Clock polarity and phase [`SensorSpi`] drives the bus with.
pub const SENSOR_SPI_MODE: Mode = Mode {
    polarity: Polarity::IdleHigh,
    phase: Phase::CaptureOnSecondTransition,
};

/// Byte-wide register file of a device behind a serial bus.
pub trait RegisterAccess {
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error>;
    fn read_register(&mut self, address: u8) -> Result<u8, Error>;

    /// Reads consecutive registers starting at `address`.
    fn read_registers(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        for (offset, b) in buf.iter_mut().enumerate() {
            *b = self.read_register(address.wrapping_add(offset as u8))?;
        }
        Ok(())
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error> {
        (**self).write_register(address, value)
    }
    fn read_register(&mut self, address: u8) -> Result<u8, Error> {
        (**self).read_register(address)
    }
    fn read_registers(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        (**self).read_registers(address, buf)
    }
}

/// Bit-banged SPI master for one sensor. `sdi` and `sdo` are named from the
/// sensor's point of view: the master drives `sdi` and samples `sdo`.
pub struct SensorSpi<CS, SCLK, SDI, SDO> {
    cs: CS,
    sclk: SCLK,
    sdi: SDI,
    sdo: SDO,
    cs_active: PinState,
}

impl<CS, SCLK, SDI, SDO> SensorSpi<CS, SCLK, SDI, SDO>
where
    CS: OutputPin,
    SCLK: OutputPin,
    SDI: OutputPin,
    SDO: InputPin,
{
    /// Chip select is taken to be active low, as on every sensor of the boards.
    pub fn new(cs: CS, sclk: SCLK, sdi: SDI, sdo: SDO) -> Self {
        Self::with_cs_active(cs, sclk, sdi, sdo, PinState::Low)
    }

    pub fn with_cs_active(cs: CS, sclk: SCLK, sdi: SDI, sdo: SDO, cs_active: PinState) -> Self {
        Self {
            cs,
            sclk,
            sdi,
            sdo,
            cs_active,
        }
    }

    /// Brings the bus to its idle state: chip select released, clock high,
    /// data low.
    pub fn init(&mut self) -> Result<(), Error> {
        self.deselect()?;
        self.sclk.set_high().map_err(|_| Error::Pin)?;
        self.sdi.set_low().map_err(|_| Error::Pin)?;
        Ok(())
    }

    /// Writes `data` into the register at `address`.
    pub fn write(&mut self, address: u8, data: u8) -> Result<(), Error> {
        self.begin()?;
        self.shift_out(address)?;
        self.shift_out(data)?;
        self.deselect()
    }

    /// Reads the register at `address`. Without a device on the bus the
    /// result is whatever level SDO floats at.
    pub fn read(&mut self, address: u8) -> Result<u8, Error> {
        self.begin()?;
        self.shift_out(READ | address)?;
        let value = self.shift_in()?;
        self.deselect()?;
        Ok(value)
    }

    /// Reads `buf.len()` consecutive registers in one transaction.
    pub fn read_burst(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.begin()?;
        self.shift_out(READ | MULTI_BYTE | address)?;
        for b in buf.iter_mut() {
            *b = self.shift_in()?;
        }
        self.deselect()
    }

    /// Level of the sensor's data output, sampled outside of a transaction.
    pub fn dout(&self) -> Result<bool, Error> {
        self.sdo.is_high().map_err(|_| Error::Pin)
    }

    pub fn release(self) -> (CS, SCLK, SDI, SDO) {
        (self.cs, self.sclk, self.sdi, self.sdo)
    }

    fn begin(&mut self) -> Result<(), Error> {
        self.sclk.set_high().map_err(|_| Error::Pin)?;
        self.cs.set_state(self.cs_active).map_err(|_| Error::Pin)
    }

    fn deselect(&mut self) -> Result<(), Error> {
        self.cs.set_state(!self.cs_active).map_err(|_| Error::Pin)
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), Error> {
        for i in (0..8).rev() {
            self.sclk.set_low().map_err(|_| Error::Pin)?;
            let state = PinState::from((byte >> i) & 1 != 0);
            self.sdi.set_state(state).map_err(|_| Error::Pin)?;
            self.sclk.set_high().map_err(|_| Error::Pin)?;
        }
        Ok(())
    }

    fn shift_in(&mut self) -> Result<u8, Error> {
        let mut value = 0u8;
        for _ in 0..8 {
            self.sclk.set_low().map_err(|_| Error::Pin)?;
            value = (value << 1) | self.dout()? as u8;
            self.sclk.set_high().map_err(|_| Error::Pin)?;
        }
        Ok(value)
    }
}

/// [`SensorSpi`] on the GPIOs of a port backend.
pub type PortSpi<'a, IO> = SensorSpi<PortPin<'a, IO>, PortPin<'a, IO>, PortPin<'a, IO>, PortPin<'a, IO>>;

impl<'a, IO: PortIo> PortSpi<'a, IO> {
    /// Configures the pin directions of a board bus. The bus still needs
    /// [`init`](SensorSpi::init).
    pub fn on_port(io: &'a IO, pins: &SpiPins) -> Self {
        SensorSpi::new(
            PortPin::output(io, pins.cs),
            PortPin::output(io, pins.sclk),
            PortPin::output(io, pins.sdi),
            PortPin::input(io, pins.sdo),
        )
    }
}

impl<CS, SCLK, SDI, SDO> RegisterAccess for SensorSpi<CS, SCLK, SDI, SDO>
where
    CS: OutputPin,
    SCLK: OutputPin,
    SDI: OutputPin,
    SDO: InputPin,
{
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error> {
        self.write(address, value)
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Error> {
        self.read(address)
    }

    fn read_registers(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.read_burst(address, buf)
    }
}
