use core::ptr::{read_volatile, write_volatile};

/// Status register, holds the global interrupt flag.
const SREG: Reg = Reg::at(0x5F);

/// One 8 bit register in the ATmega128 data space.
#[derive(Copy, Clone)]
pub(crate) struct Reg(usize);

impl Reg {
    /// Addresses are data-space addresses (I/O address + 0x20 for the low
    /// I/O range).
    pub(crate) const fn at(addr: usize) -> Self {
        Reg(addr)
    }

    pub(crate) fn read(self) -> u8 {
        // SAFETY: only constructed for addresses of the ATmega128 register file.
        unsafe { read_volatile(self.0 as *const u8) }
    }

    pub(crate) fn write(self, v: u8) {
        // SAFETY: see `read`.
        unsafe { write_volatile(self.0 as *mut u8, v) }
    }

    /// Read-modify-write with interrupts held off, so an ISR touching the
    /// same register cannot be lost.
    pub(crate) fn modify(self, f: impl FnOnce(u8) -> u8) {
        free(|| self.write(f(self.read())))
    }

    pub(crate) fn set_bits(self, mask: u8) {
        self.modify(|v| v | mask)
    }

    pub(crate) fn clear_bits(self, mask: u8) {
        self.modify(|v| v & !mask)
    }
}

/// Runs `f` with interrupts disabled and restores the previous state.
pub(crate) fn free<R>(f: impl FnOnce() -> R) -> R {
    let sreg = SREG.read();
    cli();
    let r = f();
    SREG.write(sreg);
    r
}

#[cfg(target_arch = "avr")]
fn cli() {
    // SAFETY: clears the global interrupt flag, nothing else.
    unsafe { core::arch::asm!("cli") }
}

#[cfg(not(target_arch = "avr"))]
fn cli() {}

#[cfg(target_arch = "avr")]
pub(crate) fn nop() {
    // SAFETY: no-op.
    unsafe { core::arch::asm!("nop") }
}

#[cfg(not(target_arch = "avr"))]
pub(crate) fn nop() {
    core::hint::spin_loop()
}
