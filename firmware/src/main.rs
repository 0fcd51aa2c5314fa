#![cfg_attr(target_arch = "avr", no_std, no_main)]

mod accel;
mod config;

use drivers::{board::Radio, Context, Never};
use embedded_hal::blocking::delay::DelayMs;

use config::{BOARD, CKLFCON, F_CPU, SENSOR_STARTUP_MS};

fn node(mut ctx: Context) -> Never {
    let board = ctx.board;
    log::info!("{}: F_CPU {} Hz, CKLFCON {:#04x}", board.name, F_CPU, CKLFCON);

    board.led_init(&ctx.ports);
    board.sensors_enable(&ctx.ports);
    ctx.delay.delay_ms(SENSOR_STARTUP_MS);

    // The radio is not used by this node, park its bus.
    if matches!(board.radio, Some(Radio::Nrf905 | Radio::Cc2420)) {
        let mut radio = ctx.radio_spi();
        radio.init();
        radio.disable();
    }
    if let Some(irq) = &ctx.radio_irq {
        irq.init(&ctx.ports);
        irq.disable();
    }

    if let Err(e) = accel::poll(&ctx) {
        log::error!("accelerometer: {}", e);
    }

    board.sensors_disable(&ctx.ports);
    loop {
        board.led_toggle(&ctx.ports, 0);
        drivers::sleep(board.sleep.delay_s);
        ctx.delay.delay_ms(500);
    }
}

#[cfg(target_arch = "avr")]
#[no_mangle]
pub extern "C" fn main() -> ! {
    drivers::run(BOARD, F_CPU, node)
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    env_logger::init();
    drivers::run(BOARD, F_CPU, node)
}
