use drivers_shared::pins::{Direction, PinId, Port, PortIo};

use crate::reg::Reg;

/// PORTx / DDRx / PINx of one port.
#[derive(Copy, Clone)]
struct PortRegs {
    port: Reg,
    ddr: Reg,
    pin: Reg,
}

const fn regs(port: usize, ddr: usize, pin: usize) -> Option<PortRegs> {
    Some(PortRegs {
        port: Reg::at(port),
        ddr: Reg::at(ddr),
        pin: Reg::at(pin),
    })
}

fn port_regs(port: Port) -> Option<PortRegs> {
    match port {
        Port::A => regs(0x3B, 0x3A, 0x39),
        Port::B => regs(0x38, 0x37, 0x36),
        Port::C => regs(0x35, 0x34, 0x33),
        Port::D => regs(0x32, 0x31, 0x30),
        Port::E => regs(0x23, 0x22, 0x21),
        Port::F => regs(0x62, 0x61, 0x20),
        Port::G => regs(0x65, 0x64, 0x63),
        // nRF9E5 ports, not present on the ATmega128.
        Port::P0 | Port::P1 => None,
    }
}

/// GPIO ports of the ATmega128.
pub struct AvrPorts {
    _private: (),
}

impl AvrPorts {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

impl PortIo for AvrPorts {
    fn set_pin(&self, pin: PinId) {
        if let Some(r) = port_regs(pin.port) {
            r.port.set_bits(pin.mask());
        }
    }

    fn clear_pin(&self, pin: PinId) {
        if let Some(r) = port_regs(pin.port) {
            r.port.clear_bits(pin.mask());
        }
    }

    fn read_pin(&self, pin: PinId) -> bool {
        port_regs(pin.port).is_some_and(|r| r.pin.read() & pin.mask() != 0)
    }

    fn set_direction(&self, pin: PinId, dir: Direction) {
        if let Some(r) = port_regs(pin.port) {
            match dir {
                Direction::Output => r.ddr.set_bits(pin.mask()),
                Direction::Input => r.ddr.clear_bits(pin.mask()),
            }
        }
    }

    fn toggle_pin(&self, pin: PinId) {
        if let Some(r) = port_regs(pin.port) {
            r.port.modify(|v| v ^ pin.mask());
        }
    }

    fn write_port(&self, port: Port, out: u8, dir: u8) {
        if let Some(r) = port_regs(port) {
            r.port.write(out);
            r.ddr.write(dir);
        }
    }
}
