#![no_std]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

use core::sync::atomic::{AtomicBool, Ordering};

use drivers_shared::{
    board::{Board, Mcu},
    spi::PortSpi,
    Error,
};

pub mod delay;
pub mod ext_int;
pub mod ports;
pub mod spi;

mod power;
mod reg;

pub use drivers_shared::{adxl345, board, boards, clock, pins, sleep};
pub use power::sleep;

pub type Ports = ports::AvrPorts;
pub type AccelSpi<'a> = PortSpi<'a, Ports>;

#[cfg(target_arch = "avr")]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    #[cfg(feature = "defmt")]
    defmt::error!("{}", defmt::Display2Format(info));
    #[cfg(not(feature = "defmt"))]
    log::error!("{}", info);
    sys_reset();
}

pub struct Context {
    pub board: &'static Board,
    pub ports: Ports,
    pub delay: delay::Delay,
    pub radio_irq: Option<ext_int::ExtInt>,
}

static TAKEN: AtomicBool = AtomicBool::new(false);

impl Context {
    /// Hands out the peripherals once, configured for `board`.
    pub fn take(board: &'static Board, cpu_hz: u32) -> Result<Context, Error> {
        if board.mcu != Mcu::Avr {
            return Err(Error::UnsupportedMcu(board.mcu));
        }
        board.validate()?;

        let first = reg::free(|| {
            let taken = TAKEN.load(Ordering::Relaxed);
            TAKEN.store(true, Ordering::Relaxed);
            !taken
        });
        if !first {
            return Err(Error::AlreadyTaken);
        }

        log::info!("{} at {} Hz", board.name, cpu_hz);
        let ports = ports::AvrPorts::new();
        board.init(&ports);
        Ok(Context {
            board,
            ports,
            delay: delay::Delay::new(cpu_hz),
            radio_irq: ext_int::ExtInt::for_board(board),
        })
    }

    /// Bit-banged bus of the accelerometer, if the board has one.
    pub fn accel_spi(&self) -> Option<AccelSpi<'_>> {
        self.board
            .accel
            .map(|pins| PortSpi::on_port(&self.ports, &pins))
    }

    pub fn radio_spi(&self) -> spi::HwSpi<'_> {
        spi::HwSpi::new(&self.ports)
    }
}

/// Restarts the MCU through the watchdog.
pub fn sys_reset() -> ! {
    const WDTCR: reg::Reg = reg::Reg::at(0x41);
    const WDCE: u8 = 4;
    const WDE: u8 = 3;
    reg::free(|| {
        WDTCR.write((1 << WDCE) | (1 << WDE));
        WDTCR.write(1 << WDE);
    });
    loop {}
}

pub enum Never {}

pub trait Main {
    fn start(self, context: Context) -> Never;
}

impl<C: FnOnce(Context) -> Never> Main for C {
    fn start(self, context: Context) -> Never {
        self(context)
    }
}

pub fn run(board: &'static Board, cpu_hz: u32, main: impl Main) -> ! {
    let ctx = match Context::take(board, cpu_hz) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("cannot start on {}: {}", board.name, e);
            sys_reset();
        }
    };
    match main.start(ctx) {}
}
