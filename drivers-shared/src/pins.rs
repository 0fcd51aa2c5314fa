use core::{convert::Infallible, fmt};

use embedded_hal::digital::v2::{
    InputPin, OutputPin, PinState, StatefulOutputPin, ToggleableOutputPin,
};

pub const NUM_PORTS: usize = 9;
pub const PINS_PER_PORT: usize = 8;

/// I/O ports of the supported microcontrollers. `A`..`G` belong to the
/// ATmega128, `P0` and `P1` to the nRF9E5.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, num_enum::TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    P0 = 7,
    P1 = 8,
}

impl Port {
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: Port,
    pub bit: u8,
}

impl PinId {
    pub const fn new(port: Port, bit: u8) -> Self {
        assert!(bit < PINS_PER_PORT as u8);
        Self { port, bit }
    }

    pub const fn mask(self) -> u8 {
        1 << self.bit
    }

    /// Position of the pin in a bitmap spanning every port.
    pub const fn slot(self) -> usize {
        self.port.index() * PINS_PER_PORT + self.bit as usize
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Port::P0 => write!(f, "P0.{}", self.bit),
            Port::P1 => write!(f, "P1.{}", self.bit),
            port => write!(f, "P{:?}{}", port, self.bit),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Logical names of the signals routed on the boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    Led0,
    Led1,
    SensorPower,
    /// Sensor supply switch on the USB programming board.
    UsbSensorPower,
    BatteryMonitor,
    UartRx,
    I2cScl,
    I2cSda,

    RadioSpiCsn,
    RadioSpiSclk,
    RadioSpiMosi,
    RadioSpiMiso,

    // CC2420
    RfVreg,
    RfResetN,
    RfFifoP,
    RfFifo,
    RfSfd,
    RfCca,

    // nRF905
    RfTrxCe,
    RfPwrUp,
    RfTxEn,
    RfCd,
    RfAm,
    RfDr,

    AccelCs,
    AccelSclk,
    AccelSdi,
    AccelSdo,

    AdcCs,
    AdcSclk,
    AdcSdi,
    AdcSdo,

    SdCs,
    SdSclk,
    SdSdi,
    SdSdo,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinBinding {
    pub signal: Signal,
    pub pin: PinId,
}

pub const fn bind(signal: Signal, port: Port, bit: u8) -> PinBinding {
    PinBinding {
        signal,
        pin: PinId::new(port, bit),
    }
}

/// Access to the I/O port registers of a microcontroller.
///
/// Implementations are register banks: they are shared by every pin of the
/// board, so all methods take `&self`.
pub trait PortIo {
    fn set_pin(&self, pin: PinId);
    fn clear_pin(&self, pin: PinId);
    /// Level present on the pin (PINx on the AVR).
    fn read_pin(&self, pin: PinId) -> bool;
    fn set_direction(&self, pin: PinId, dir: Direction);
    /// Overwrite output latch and direction of a whole port. A one in `dir`
    /// makes the pin an output.
    fn write_port(&self, port: Port, out: u8, dir: u8);

    fn write_pin(&self, pin: PinId, high: bool) {
        if high {
            self.set_pin(pin)
        } else {
            self.clear_pin(pin)
        }
    }

    fn toggle_pin(&self, pin: PinId) {
        let high = self.read_pin(pin);
        self.write_pin(pin, !high);
    }
}

impl<T: PortIo + ?Sized> PortIo for &T {
    fn set_pin(&self, pin: PinId) {
        (**self).set_pin(pin)
    }
    fn clear_pin(&self, pin: PinId) {
        (**self).clear_pin(pin)
    }
    fn read_pin(&self, pin: PinId) -> bool {
        (**self).read_pin(pin)
    }
    fn set_direction(&self, pin: PinId, dir: Direction) {
        (**self).set_direction(pin, dir)
    }
    fn write_port(&self, port: Port, out: u8, dir: u8) {
        (**self).write_port(port, out, dir)
    }
    fn toggle_pin(&self, pin: PinId) {
        (**self).toggle_pin(pin)
    }
}

/// A single pin of a [`PortIo`], usable wherever an embedded-hal pin is expected.
pub struct PortPin<'a, IO: PortIo> {
    io: &'a IO,
    pin: PinId,
}

impl<'a, IO: PortIo> PortPin<'a, IO> {
    pub fn output(io: &'a IO, pin: PinId) -> Self {
        io.set_direction(pin, Direction::Output);
        Self { io, pin }
    }

    pub fn input(io: &'a IO, pin: PinId) -> Self {
        io.set_direction(pin, Direction::Input);
        Self { io, pin }
    }

    pub fn id(&self) -> PinId {
        self.pin
    }
}

impl<IO: PortIo> OutputPin for PortPin<'_, IO> {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.io.clear_pin(self.pin);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.io.set_pin(self.pin);
        Ok(())
    }

    fn set_state(&mut self, state: PinState) -> Result<(), Self::Error> {
        self.io.write_pin(self.pin, state == PinState::High);
        Ok(())
    }
}

impl<IO: PortIo> StatefulOutputPin for PortPin<'_, IO> {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.io.read_pin(self.pin))
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.io.read_pin(self.pin))
    }
}

impl<IO: PortIo> ToggleableOutputPin for PortPin<'_, IO> {
    type Error = Infallible;

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.io.toggle_pin(self.pin);
        Ok(())
    }
}

impl<IO: PortIo> InputPin for PortPin<'_, IO> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.io.read_pin(self.pin))
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.io.read_pin(self.pin))
    }
}
