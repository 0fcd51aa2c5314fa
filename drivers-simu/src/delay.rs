use std::time::Duration;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};

/// Host delay. The CPU clock only matters on the target.
#[derive(Copy, Clone)]
pub struct Delay {
    _cpu_hz: u32,
}

impl Delay {
    pub fn new(cpu_hz: u32) -> Self {
        Self { _cpu_hz: cpu_hz }
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        std::thread::sleep(Duration::from_millis(ms.into()));
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        std::thread::sleep(Duration::from_micros(us.into()));
    }
}
