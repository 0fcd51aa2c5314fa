//! Register bank used by the unit tests of this crate.

use std::cell::RefCell;

use crate::pins::{Direction, PinId, Port, PortIo, NUM_PORTS};

#[derive(Default)]
struct Regs {
    out: [u8; NUM_PORTS],
    dir: [u8; NUM_PORTS],
    input: [u8; NUM_PORTS],
    log: Vec<(PinId, bool)>,
}

/// Ports that remember every pin write.
#[derive(Default)]
pub struct FakePorts {
    regs: RefCell<Regs>,
}

impl FakePorts {
    pub fn output(&self, pin: PinId) -> bool {
        self.regs.borrow().out[pin.port.index()] & pin.mask() != 0
    }

    pub fn is_output(&self, pin: PinId) -> bool {
        self.regs.borrow().dir[pin.port.index()] & pin.mask() != 0
    }

    pub fn port(&self, port: Port) -> (u8, u8) {
        let regs = self.regs.borrow();
        (regs.out[port.index()], regs.dir[port.index()])
    }

    /// Level an external driver puts on an input pin.
    pub fn set_input(&self, pin: PinId, high: bool) {
        let mut regs = self.regs.borrow_mut();
        let v = &mut regs.input[pin.port.index()];
        if high {
            *v |= pin.mask();
        } else {
            *v &= !pin.mask();
        }
    }

    pub fn log(&self) -> Vec<(PinId, bool)> {
        self.regs.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.regs.borrow_mut().log.clear();
    }

    fn write(&self, pin: PinId, high: bool) {
        let mut regs = self.regs.borrow_mut();
        let v = &mut regs.out[pin.port.index()];
        if high {
            *v |= pin.mask();
        } else {
            *v &= !pin.mask();
        }
        regs.log.push((pin, high));
    }
}

impl PortIo for FakePorts {
    fn set_pin(&self, pin: PinId) {
        self.write(pin, true);
    }

    fn clear_pin(&self, pin: PinId) {
        self.write(pin, false);
    }

    fn read_pin(&self, pin: PinId) -> bool {
        let regs = self.regs.borrow();
        let i = pin.port.index();
        let src = if regs.dir[i] & pin.mask() != 0 {
            regs.out[i]
        } else {
            regs.input[i]
        };
        src & pin.mask() != 0
    }

    fn set_direction(&self, pin: PinId, dir: Direction) {
        let mut regs = self.regs.borrow_mut();
        let v = &mut regs.dir[pin.port.index()];
        match dir {
            Direction::Output => *v |= pin.mask(),
            Direction::Input => *v &= !pin.mask(),
        }
    }

    fn write_port(&self, port: Port, out: u8, dir: u8) {
        let mut regs = self.regs.borrow_mut();
        regs.out[port.index()] = out;
        regs.dir[port.index()] = dir;
    }
}
