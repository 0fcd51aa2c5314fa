use std::sync::atomic::{AtomicBool, Ordering};

use drivers_shared::{
    board::{Board, Mcu},
    spi::PortSpi,
    Error,
};

pub mod accel;
pub mod delay;
pub mod ext_int;
pub mod ports;
pub mod spi;

mod power;

pub use drivers_shared::{adxl345, board, boards, clock, pins, sleep};
pub use power::sleep;

pub type Ports = ports::SimPorts;
pub type AccelSpi<'a> = PortSpi<'a, Ports>;

pub struct Context {
    pub board: &'static Board,
    pub ports: Ports,
    pub delay: delay::Delay,
    pub radio_irq: Option<ext_int::ExtInt>,
    /// Simulated accelerometer wired to the board's accelerometer bus.
    pub accel: Option<accel::SimAdxl345>,
}

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Only the ATmega128 boards run on this backend, as on the target.
fn check_board(board: &Board) -> Result<(), Error> {
    if board.mcu != Mcu::Avr {
        return Err(Error::UnsupportedMcu(board.mcu));
    }
    board.validate()
}

impl Context {
    pub fn take(board: &'static Board, cpu_hz: u32) -> Result<Context, Error> {
        check_board(board)?;
        if TAKEN.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyTaken);
        }
        Self::new(board, cpu_hz)
    }

    /// A fresh simulated board. Unlike [`take`](Self::take) this can be
    /// called any number of times.
    pub fn new(board: &'static Board, cpu_hz: u32) -> Result<Context, Error> {
        check_board(board)?;
        log::info!("simulating {} at {} Hz", board.name, cpu_hz);

        let ports = ports::SimPorts::default();
        let accel = board.accel.map(|pins| {
            let dev = accel::SimAdxl345::new(pins);
            ports.attach(dev.clone());
            dev
        });
        board.init(&ports);

        Ok(Context {
            board,
            ports,
            delay: delay::Delay::new(cpu_hz),
            radio_irq: ext_int::ExtInt::for_board(board),
            accel,
        })
    }

    pub fn accel_spi(&self) -> Option<AccelSpi<'_>> {
        self.board
            .accel
            .map(|pins| PortSpi::on_port(&self.ports, &pins))
    }

    pub fn radio_spi(&self) -> spi::HwSpi<'_> {
        spi::HwSpi::new(&self.ports)
    }
}

pub fn sys_reset() -> ! {
    println!("Simulated reset. Exiting Simulator.");
    std::process::exit(0);
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
            std::process::exit(1);
        }
    };
    match main.start(ctx) {}
}
