//! Hardware SPI of the ATmega128 with nothing attached but pull-ups.

use drivers_shared::{
    pins::{Direction, PinId, Port, PortIo},
    spi::{RegisterAccess, READ},
    Error,
};

use crate::ports::SimPorts;

pub const CSN: PinId = PinId::new(Port::B, 0);
pub const SCLK: PinId = PinId::new(Port::B, 1);
pub const MOSI: PinId = PinId::new(Port::B, 2);
pub const MISO: PinId = PinId::new(Port::B, 3);

pub struct HwSpi<'a> {
    ports: &'a SimPorts,
    enabled: bool,
    sent: Vec<u8>,
}

impl<'a> HwSpi<'a> {
    pub(crate) fn new(ports: &'a SimPorts) -> Self {
        Self {
            ports,
            enabled: false,
            sent: Vec::new(),
        }
    }

    pub fn init(&mut self) {
        for pin in [CSN, SCLK, MOSI] {
            self.ports.set_direction(pin, Direction::Output);
        }
        self.ports.set_direction(MISO, Direction::Input);
        for pin in [MOSI, SCLK, CSN, MISO] {
            self.ports.set_pin(pin);
        }
        self.enabled = true;
        self.deselect();
    }

    pub fn disable(&mut self) {
        for pin in [MOSI, SCLK, MISO] {
            self.ports.clear_pin(pin);
        }
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn select(&mut self) {
        self.ports.clear_pin(CSN);
    }

    pub fn deselect(&mut self) {
        self.ports.set_pin(CSN);
    }

    /// The byte clocked in is MISO's level in every bit.
    pub fn exchange(&mut self, byte: u8) -> u8 {
        if !self.enabled {
            log::warn!("spi: exchange while disabled");
        }
        self.sent.push(byte);
        if self.ports.read_pin(MISO) {
            0xFF
        } else {
            0x00
        }
    }

    /// Bytes shifted out since the bus was created.
    pub fn sent(&self) -> &[u8] {
        &self.sent
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconnected_bus_reads_ones() {
        let ports = SimPorts::default();
        let mut spi = HwSpi::new(&ports);
        spi.init();
        assert!(ports.is_output(CSN));
        assert!(ports.read_pin(CSN));
        assert_eq!(spi.read_register(0x0a).unwrap(), 0xFF);
        spi.write_register(0x01, 0x5a).unwrap();
        assert_eq!(spi.sent(), [0x8a, 0x00, 0x01, 0x5a]);
        assert!(ports.read_pin(CSN));
    }

    #[test]
    fn disable_drops_bus_lines() {
        let ports = SimPorts::default();
        let mut spi = HwSpi::new(&ports);
        spi.init();
        spi.disable();
        assert!(!ports.read_pin(SCLK));
        assert!(!ports.read_pin(MOSI));
        assert!(ports.read_pin(CSN));
    }
}
