//! SPI peripheral of the ATmega128, wired to the radio on the 25 mm boards.

use drivers_shared::{
    bit,
    pins::{Direction, PinId, Port, PortIo},
    spi::{RegisterAccess, READ},
    Error,
};

use crate::{ports::AvrPorts, reg::Reg};

const SPCR: Reg = Reg::at(0x2D);
const SPSR: Reg = Reg::at(0x2E);
const SPDR: Reg = Reg::at(0x2F);

const SPE: u8 = 6;
const MSTR: u8 = 4;
const SPIF: u8 = 7;

pub const CSN: PinId = PinId::new(Port::B, 0);
pub const SCLK: PinId = PinId::new(Port::B, 1);
pub const MOSI: PinId = PinId::new(Port::B, 2);
pub const MISO: PinId = PinId::new(Port::B, 3);

/// Hardware SPI master, mode 0 at F_CPU / 4.
pub struct HwSpi<'a> {
    ports: &'a AvrPorts,
}

impl<'a> HwSpi<'a> {
    pub(crate) fn new(ports: &'a AvrPorts) -> Self {
        Self { ports }
    }

    /// Enables the peripheral in master mode and releases chip select.
    pub fn init(&mut self) {
        for pin in [CSN, SCLK, MOSI] {
            self.ports.set_direction(pin, Direction::Output);
        }
        self.ports.set_direction(MISO, Direction::Input);
        for pin in [MOSI, SCLK, CSN, MISO] {
            self.ports.set_pin(pin);
        }
        SPCR.write(bit(SPE) | bit(MSTR));
        self.deselect();
    }

    /// Drops the bus lines and switches the peripheral off to save power.
    pub fn disable(&mut self) {
        for pin in [MOSI, SCLK, MISO] {
            self.ports.clear_pin(pin);
        }
        SPCR.clear_bits(bit(SPE));
    }

    pub fn enable(&mut self) {
        SPCR.set_bits(bit(SPE));
    }

    pub fn select(&mut self) {
        self.ports.clear_pin(CSN);
    }

    pub fn deselect(&mut self) {
        self.ports.set_pin(CSN);
    }

    /// Shifts one byte out and returns the byte clocked in meanwhile.
    pub fn exchange(&mut self, byte: u8) -> u8 {
        SPDR.write(byte);
        while SPSR.read() & bit(SPIF) == 0 {}
        SPDR.read()
    }
}

/// ADXL345 framing, with the read flag in the MSB of the address byte. Only
/// for such a device on the hardware bus: the nRF905 and the CC2420 have
/// their own command sets and go through [`exchange`](HwSpi::exchange).
impl RegisterAccess for HwSpi<'_> {
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error> {
        self.select();
        self.exchange(address);
        self.exchange(value);
        self.deselect();
        Ok(())
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Error> {
        self.select();
        self.exchange(READ | address);
        let value = self.exchange(0);
        self.deselect();
        Ok(value)
    }
}
