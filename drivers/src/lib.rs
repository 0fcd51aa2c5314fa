#![no_std]

#[cfg(target_arch = "avr")]
pub use drivers_hw::*;
#[cfg(not(target_arch = "avr"))]
pub use drivers_simu::*;
