use std::cell::Cell;

use drivers_shared::{
    board::{Board, Edge, ExtInterrupt},
    pins::{Direction, PinId, PortIo},
};

pub struct ExtInt {
    line: u8,
    edge: Edge,
    pin: PinId,
    enabled: Cell<bool>,
    pending: Cell<bool>,
}

impl ExtInt {
    pub fn for_board(board: &Board) -> Option<Self> {
        let ExtInterrupt { line, edge, signal } = board.radio_interrupt?;
        Some(Self {
            line,
            edge,
            pin: board.pin(signal)?,
            enabled: Cell::new(false),
            pending: Cell::new(false),
        })
    }

    pub fn line(&self) -> u8 {
        self.line
    }

    pub fn init(&self, io: &impl PortIo) {
        io.set_direction(self.pin, Direction::Input);
        self.clear();
        log::debug!("INT{} on {} ({:?})", self.line, self.pin, self.edge);
    }

    pub fn enable(&self) {
        self.enabled.set(true);
    }

    pub fn disable(&self) {
        self.enabled.set(false);
    }

    pub fn clear(&self) {
        self.pending.set(false);
    }

    pub fn pending(&self) -> bool {
        self.pending.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Signals the configured edge on the line. The request is latched
    /// whether or not the line is enabled, as on the real part.
    pub fn raise(&self) {
        self.pending.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SimPorts;
    use drivers_shared::boards;

    #[test]
    fn radio_interrupt_of_nrf905_board() {
        let irq = ExtInt::for_board(&boards::NRF905_REVA_433).unwrap();
        assert_eq!(irq.line(), 4);
        assert_eq!(irq.edge, Edge::Rising);

        let io = SimPorts::default();
        irq.init(&io);
        assert!(!io.is_output(irq.pin));
        assert!(!irq.is_enabled());
        irq.raise();
        assert!(irq.pending());
        irq.enable();
        assert!(irq.is_enabled());
        irq.clear();
        irq.disable();
        assert!(!irq.pending() && !irq.is_enabled());
    }

    #[test]
    fn boards_without_radio_interrupt() {
        assert!(ExtInt::for_board(&boards::BLUETOOTH_REV1_0).is_none());
        assert!(ExtInt::for_board(&boards::WIMU_REV3_A).is_none());
    }
}
