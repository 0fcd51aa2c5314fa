//! Tyndall 25 mm Bluetooth module, rev 1.0.
//!
//! The board file this comes from still carried the CC2420 pin and interrupt
//! assignments in disabled form. They are not part of this board.

use crate::{
    board::{Board, Mcu, Radio, SleepModes},
    pins::{bind, PinBinding, Port, Signal},
    sleep::SleepMode,
};

use super::{AVR_25MM_PORT_INIT, AVR_25MM_SENSOR_POWER};

const PINS: &[PinBinding] = &[
    bind(Signal::UsbSensorPower, Port::A, 2),
    bind(Signal::RadioSpiCsn, Port::B, 0),
    bind(Signal::BatteryMonitor, Port::B, 6),
    bind(Signal::SensorPower, Port::C, 1),
    bind(Signal::I2cScl, Port::D, 0),
    bind(Signal::I2cSda, Port::D, 1),
    bind(Signal::UartRx, Port::E, 1),
];

pub static BLUETOOTH_REV1_0: Board = Board {
    name: "25_Bluetooth_rev1_0",
    mcu: Mcu::Avr,
    radio: Some(Radio::Bluetooth),
    band: None,
    pins: PINS,
    leds: None,
    sensor_power: Some(AVR_25MM_SENSOR_POWER),
    port_init: AVR_25MM_PORT_INIT,
    sleep: SleepModes {
        radio: SleepMode::Idle,
        delay_s: SleepMode::Deep,
        delay_ms: None,
    },
    radio_interrupt: None,
    accel: None,
    adc: None,
    sd: None,
    has_hardware_i2c: true,
    has_tosc1_crystal: true,
    tick_dv: None,
};
