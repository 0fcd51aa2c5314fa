//! Tyndall 10 mm nRF9E5 module.

use crate::{
    board::{Band, Board, LedPolarity, Leds, Mcu, PortInit, Radio, SensorPower, SleepModes},
    bit,
    clock::TICK_DV_31_25_MS,
    pins::{bind, PinBinding, PinId, Port, Signal},
    sleep::SleepMode,
};

const LED_0: PinId = PinId::new(Port::P0, 0);
const SENSORS_PWR: PinId = PinId::new(Port::P0, 6);

const PINS: &[PinBinding] = &[
    bind(Signal::Led0, Port::P0, 0),
    bind(Signal::I2cScl, Port::P0, 3),
    bind(Signal::I2cSda, Port::P0, 5),
    bind(Signal::SensorPower, Port::P0, 6),
];

// LED off (active low), I2C lines idle high, everything driven.
const PORT_INIT: &[PortInit] = &[PortInit {
    port: Port::P0,
    out: bit(0) | bit(3) | bit(5),
    dir: 0xff,
}];

const fn board(name: &'static str, band: Band) -> Board {
    Board {
        name,
        mcu: Mcu::Nrf8051,
        radio: Some(Radio::Nrf9e5),
        band: Some(band),
        pins: PINS,
        leds: Some(Leds {
            pins: &[LED_0],
            polarity: LedPolarity::ActiveLow,
        }),
        sensor_power: Some(SensorPower {
            pin: SENSORS_PWR,
            active_low: false,
        }),
        port_init: PORT_INIT,
        sleep: SleepModes {
            radio: SleepMode::Idle,
            delay_s: SleepMode::PowerDown,
            delay_ms: Some(SleepMode::Idle),
        },
        radio_interrupt: None,
        accel: None,
        adc: None,
        sd: None,
        has_hardware_i2c: false,
        has_tosc1_crystal: true,
        tick_dv: Some(TICK_DV_31_25_MS),
    }
}

pub static NRF9E5_433: Board = board("10_nrf9e5_433", Band::Mhz433);
pub static NRF9E5_868: Board = board("10_nrf9e5_868", Band::Mhz868);
