//! External interrupt lines INT0..INT7.

use drivers_shared::{
    bit,
    board::{Board, Edge, ExtInterrupt},
    pins::{Direction, PinId, PortIo},
};

use crate::reg::Reg;

const EICRA: Reg = Reg::at(0x6A);
const EICRB: Reg = Reg::at(0x5A);
const EIMSK: Reg = Reg::at(0x59);
const EIFR: Reg = Reg::at(0x58);

/// The radio interrupt of a board.
pub struct ExtInt {
    line: u8,
    edge: Edge,
    pin: PinId,
}

impl ExtInt {
    /// `None` for boards without a radio interrupt.
    pub fn for_board(board: &Board) -> Option<Self> {
        let ExtInterrupt { line, edge, signal } = board.radio_interrupt?;
        Some(Self {
            line,
            edge,
            pin: board.pin(signal)?,
        })
    }

    pub fn line(&self) -> u8 {
        self.line
    }

    /// Makes the pin an input and programs the sense control. The line stays
    /// masked until [`enable`](Self::enable).
    pub fn init(&self, io: &impl PortIo) {
        io.set_direction(self.pin, Direction::Input);
        let (reg, shift) = if self.line < 4 {
            (EICRA, self.line * 2)
        } else {
            (EICRB, (self.line - 4) * 2)
        };
        reg.modify(|v| (v & !(0b11 << shift)) | (self.edge.isc_bits() << shift));
        self.clear();
        log::debug!("INT{} on {}", self.line, self.pin);
    }

    pub fn enable(&self) {
        EIMSK.set_bits(bit(self.line));
    }

    pub fn disable(&self) {
        EIMSK.clear_bits(bit(self.line));
    }

    /// Clears a pending request. The flag is cleared by writing a one.
    pub fn clear(&self) {
        EIFR.write(bit(self.line));
    }

    pub fn pending(&self) -> bool {
        EIFR.read() & bit(self.line) != 0
    }
}
