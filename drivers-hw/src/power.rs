use drivers_shared::sleep::{SleepMode, MCUCR_SLEEP_MASK};

use crate::reg::Reg;

const MCUCR: Reg = Reg::at(0x55);

/// Enters `mode` until the next interrupt. Interrupts must be enabled for
/// the MCU to wake up again.
pub fn sleep(mode: SleepMode) {
    MCUCR.modify(|v| (v & !MCUCR_SLEEP_MASK) | mode.avr_mcucr_bits());
    sleep_instruction();
    // Clear SE again, so a stray `sleep` cannot put the MCU down.
    MCUCR.modify(|v| v & !MCUCR_SLEEP_MASK);
}

#[cfg(target_arch = "avr")]
fn sleep_instruction() {
    // SAFETY: the sleep instruction has no memory effects.
    unsafe { core::arch::asm!("sleep") }
}

#[cfg(not(target_arch = "avr"))]
fn sleep_instruction() {}
