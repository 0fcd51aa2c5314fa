//! Simulated GPIO ports.
//!
//! Every pin change is propagated to the attached [`SimDevice`]s, which can
//! drive the MCU's inputs in turn. Inputs nobody drives read the floating
//! level of the bus.

use std::{cell::RefCell, fmt};

use drivers_shared::pins::{Direction, PinId, Port, PortIo, NUM_PORTS};

/// Level an undriven input settles at.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FloatingBus {
    /// Reads as 1, so a transfer with no device returns 0xFF.
    #[default]
    PullUp,
    PullDown,
}

#[derive(Default)]
struct Regs {
    out: [u8; NUM_PORTS],
    dir: [u8; NUM_PORTS],
    /// Levels put on the lines by devices.
    driven: [u8; NUM_PORTS],
    driven_mask: [u8; NUM_PORTS],
}

/// View of the lines handed to a device on every change.
pub struct Lines<'a> {
    regs: &'a mut Regs,
    floating: FloatingBus,
}

impl Lines<'_> {
    /// Level on the line: the MCU's latch for outputs, otherwise whatever a
    /// device drives or the floating level.
    pub fn level(&self, pin: PinId) -> bool {
        level(self.regs, self.floating, pin)
    }

    /// `None` releases the line.
    pub fn drive(&mut self, pin: PinId, level: Option<bool>) {
        let i = pin.port.index();
        match level {
            Some(high) => {
                self.regs.driven_mask[i] |= pin.mask();
                if high {
                    self.regs.driven[i] |= pin.mask();
                } else {
                    self.regs.driven[i] &= !pin.mask();
                }
            }
            None => self.regs.driven_mask[i] &= !pin.mask(),
        }
    }
}

fn level(regs: &Regs, floating: FloatingBus, pin: PinId) -> bool {
    let i = pin.port.index();
    let m = pin.mask();
    if regs.dir[i] & m != 0 {
        regs.out[i] & m != 0
    } else if regs.driven_mask[i] & m != 0 {
        regs.driven[i] & m != 0
    } else {
        floating == FloatingBus::PullUp
    }
}

/// A chip hanging off the simulated ports.
pub trait SimDevice {
    fn update(&self, lines: &mut Lines<'_>);
}

pub struct SimPorts {
    regs: RefCell<Regs>,
    devices: RefCell<Vec<Box<dyn SimDevice>>>,
    floating: FloatingBus,
}

impl Default for SimPorts {
    fn default() -> Self {
        Self::new(FloatingBus::default())
    }
}

impl fmt::Debug for SimPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regs = self.regs.borrow();
        f.debug_struct("SimPorts")
            .field("out", &regs.out)
            .field("dir", &regs.dir)
            .field("floating", &self.floating)
            .finish()
    }
}

impl SimPorts {
    pub fn new(floating: FloatingBus) -> Self {
        Self {
            regs: RefCell::default(),
            devices: RefCell::default(),
            floating,
        }
    }

    pub fn attach(&self, device: impl SimDevice + 'static) {
        self.devices.borrow_mut().push(Box::new(device));
        self.settle();
    }

    /// Output latch and direction register of a port.
    pub fn port(&self, port: Port) -> (u8, u8) {
        let regs = self.regs.borrow();
        (regs.out[port.index()], regs.dir[port.index()])
    }

    pub fn is_output(&self, pin: PinId) -> bool {
        self.regs.borrow().dir[pin.port.index()] & pin.mask() != 0
    }

    fn modify(&self, f: impl FnOnce(&mut Regs)) {
        f(&mut self.regs.borrow_mut());
        self.settle();
    }

    fn settle(&self) {
        let mut regs = self.regs.borrow_mut();
        let mut lines = Lines {
            regs: &mut *regs,
            floating: self.floating,
        };
        for device in self.devices.borrow().iter() {
            device.update(&mut lines);
        }
    }
}

impl PortIo for SimPorts {
    fn set_pin(&self, pin: PinId) {
        self.modify(|r| r.out[pin.port.index()] |= pin.mask());
    }

    fn clear_pin(&self, pin: PinId) {
        self.modify(|r| r.out[pin.port.index()] &= !pin.mask());
    }

    fn read_pin(&self, pin: PinId) -> bool {
        level(&self.regs.borrow(), self.floating, pin)
    }

    fn set_direction(&self, pin: PinId, dir: Direction) {
        self.modify(|r| match dir {
            Direction::Output => r.dir[pin.port.index()] |= pin.mask(),
            Direction::Input => r.dir[pin.port.index()] &= !pin.mask(),
        });
    }

    fn write_port(&self, port: Port, out: u8, dir: u8) {
        self.modify(|r| {
            r.out[port.index()] = out;
            r.dir[port.index()] = dir;
        });
    }
}
