use embedded_hal::blocking::delay::{DelayMs, DelayUs};

use crate::reg::nop;

/// Cycles of one iteration of the busy loop, counter update included.
const CYCLES_PER_LOOP: u32 = 8;

/// Busy-wait delay calibrated on the CPU clock.
#[derive(Copy, Clone)]
pub struct Delay {
    loops_per_ms: u32,
}

impl Delay {
    pub fn new(cpu_hz: u32) -> Self {
        Self {
            loops_per_ms: cpu_hz / 1000 / CYCLES_PER_LOOP,
        }
    }

    fn spin(loops: u32) {
        for _ in 0..loops {
            nop();
        }
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            Self::spin(self.loops_per_ms);
        }
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        Self::spin(self.loops_per_ms * u32::from(us) / 1000);
    }
}
