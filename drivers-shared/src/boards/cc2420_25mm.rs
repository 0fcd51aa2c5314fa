//! Tyndall 25 mm Zigbee module (CC2420), revA.

use crate::{
    bit,
    board::{Board, Edge, ExtInterrupt, Mcu, PortInit, Radio, SleepModes},
    pins::{bind, PinBinding, Port, Signal},
    sleep::SleepMode,
};

use super::{avr_25mm_port_init, AVR_25MM_LEDS, AVR_25MM_SENSOR_POWER};

// FIFOP and FIFO sit on the TWI pins, so the hardware I2C cannot be used.
const PINS: &[PinBinding] = &[
    bind(Signal::RadioSpiCsn, Port::B, 0),
    bind(Signal::RadioSpiSclk, Port::B, 1),
    bind(Signal::RadioSpiMosi, Port::B, 2),
    bind(Signal::RadioSpiMiso, Port::B, 3),
    bind(Signal::RfVreg, Port::B, 5),
    bind(Signal::RfResetN, Port::B, 6),
    bind(Signal::SensorPower, Port::C, 1),
    bind(Signal::RfFifoP, Port::D, 0),
    bind(Signal::RfFifo, Port::D, 1),
    bind(Signal::RfSfd, Port::D, 4),
    bind(Signal::RfCca, Port::D, 6),
    bind(Signal::UartRx, Port::E, 1),
    bind(Signal::Led1, Port::G, 0),
    bind(Signal::Led0, Port::G, 1),
];

const PORT_INIT: &[PortInit] = &avr_25mm_port_init(0x00, bit(1));

pub static CC2420_REVA: Board = Board {
    name: "25_2420_revA",
    mcu: Mcu::Avr,
    radio: Some(Radio::Cc2420),
    band: None,
    pins: PINS,
    leds: Some(AVR_25MM_LEDS),
    sensor_power: Some(AVR_25MM_SENSOR_POWER),
    port_init: PORT_INIT,
    sleep: SleepModes {
        radio: SleepMode::PowerDown,
        delay_s: SleepMode::Idle,
        delay_ms: None,
    },
    radio_interrupt: Some(ExtInterrupt {
        line: 0,
        edge: Edge::Rising,
        signal: Signal::RfFifoP,
    }),
    accel: None,
    adc: None,
    sd: None,
    has_hardware_i2c: false,
    has_tosc1_crystal: false,
    tick_dv: None,
};
