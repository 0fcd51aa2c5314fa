//! ADXL345 behind a four wire SPI bus.

use std::{cell::RefCell, rc::Rc};

use drivers_shared::{
    adxl345::{PowerMode, Reading, Register, DEVICE_ID},
    board::SpiPins,
    spi::{MULTI_BYTE, READ, SENSOR_SPI_MODE},
};
use embedded_hal::spi::Polarity;

use crate::ports::{Lines, SimDevice};

const ADDRESS_MASK: u8 = 0x3F;

struct State {
    regs: [u8; 64],
    selected: bool,
    sclk: bool,
    bits: u8,
    shift: u8,
    /// Command byte of the current transaction once it is complete.
    command: Option<u8>,
    address: u8,
    out: u8,
}

fn reset_registers() -> [u8; 64] {
    let mut regs = [0; 64];
    regs[Register::DevId.addr() as usize] = DEVICE_ID;
    regs[Register::BwRate.addr() as usize] = 0x0A;
    // DATA_READY is never set by the model.
    regs[Register::IntSource.addr() as usize] = 0x02;
    regs
}

impl State {
    fn read(&mut self, address: u8) -> u8 {
        let value = self.regs[address as usize];
        if address == Register::IntSource.addr() {
            // Reading clears the latched event interrupts.
            self.regs[address as usize] &= 0x83;
        }
        value
    }

    fn write(&mut self, address: u8, value: u8) {
        match Register::try_from(address) {
            Ok(reg) if !reg.is_read_only() => self.regs[address as usize] = value,
            _ => log::debug!("adxl345 sim: write to {:#04x} ignored", address),
        }
    }

    fn rising_edge(&mut self, sdi: bool) {
        self.shift = (self.shift << 1) | sdi as u8;
        self.bits = self.bits.wrapping_add(1);
        if self.bits % 8 != 0 {
            return;
        }
        let byte = self.shift;
        match self.command {
            None => {
                self.command = Some(byte);
                self.address = byte & ADDRESS_MASK;
                if byte & READ != 0 {
                    self.out = self.read(self.address);
                }
            }
            Some(cmd) => {
                if cmd & READ == 0 {
                    self.write(self.address, byte);
                }
                if cmd & MULTI_BYTE != 0 {
                    self.address = (self.address + 1) & ADDRESS_MASK;
                    if cmd & READ != 0 {
                        self.out = self.read(self.address);
                    }
                }
            }
        }
    }

    /// Level of the next data bit, MSB first.
    fn data_bit(&self) -> Option<bool> {
        match self.command {
            Some(cmd) if cmd & READ != 0 => Some(self.out & (0x80 >> (self.bits % 8)) != 0),
            _ => None,
        }
    }
}

/// SPI mode 3 slave: samples SDI on rising SCLK and shifts SDO out on
/// falling SCLK while CS is low. Clones share the same device, so a test
/// can keep one to inspect or stimulate the chip after attaching another.
#[derive(Clone)]
pub struct SimAdxl345 {
    pins: SpiPins,
    state: Rc<RefCell<State>>,
}

impl SimAdxl345 {
    pub fn new(pins: SpiPins) -> Self {
        Self {
            pins,
            state: Rc::new(RefCell::new(State {
                regs: reset_registers(),
                selected: false,
                sclk: SENSOR_SPI_MODE.polarity == Polarity::IdleHigh,
                bits: 0,
                shift: 0,
                command: None,
                address: 0,
                out: 0,
            })),
        }
    }

    pub fn register(&self, reg: Register) -> u8 {
        self.state.borrow().regs[reg.addr() as usize]
    }

    pub fn power_mode(&self) -> Option<PowerMode> {
        match self.register(Register::PowerCtl) & 0x0C {
            0x08 => Some(PowerMode::Measure),
            0x0C => Some(PowerMode::Sleep),
            0x04 => Some(PowerMode::Standby),
            _ => None,
        }
    }

    /// Puts a new sample into DATAX0..DATAZ1.
    pub fn set_axes(&self, reading: Reading) {
        let mut state = self.state.borrow_mut();
        let base = Register::DataX0.addr() as usize;
        for (i, v) in [reading.x, reading.y, reading.z].into_iter().enumerate() {
            state.regs[base + 2 * i..base + 2 * i + 2].copy_from_slice(&v.to_le_bytes());
        }
    }

    /// Latches interrupt events into INT_SOURCE.
    pub fn raise(&self, events: u8) {
        self.state.borrow_mut().regs[Register::IntSource.addr() as usize] |= events;
    }
}

impl SimDevice for SimAdxl345 {
    fn update(&self, lines: &mut Lines<'_>) {
        let mut state = self.state.borrow_mut();
        let cs = lines.level(self.pins.cs);
        let sclk = lines.level(self.pins.sclk);

        if cs {
            if state.selected {
                state.selected = false;
                lines.drive(self.pins.sdo, None);
            }
            state.sclk = sclk;
            return;
        }

        if !state.selected {
            state.selected = true;
            state.bits = 0;
            state.command = None;
        } else if state.sclk && !sclk {
            let bit = state.data_bit();
            lines.drive(self.pins.sdo, bit);
        } else if !state.sclk && sclk {
            let sdi = lines.level(self.pins.sdi);
            state.rising_edge(sdi);
        }
        state.sclk = sclk;
    }
}
