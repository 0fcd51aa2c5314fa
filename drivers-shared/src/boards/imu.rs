//! Inertial sensor boards built on the 25 mm Bluetooth module. Every
//! peripheral hangs off its own bit-banged SPI bus.

use crate::{
    bit,
    board::{Board, Mcu, PortInit, Radio, SensorPower, SleepModes, SpiPins},
    pins::{bind, PinBinding, PinId, Port, Signal},
    sleep::SleepMode,
};

use super::{avr_25mm_port_init, AVR_25MM_PORT_INIT};

const SLEEP: SleepModes = SleepModes {
    radio: SleepMode::Idle,
    delay_s: SleepMode::Deep,
    delay_ms: None,
};

const WIMU_PINS: &[PinBinding] = &[
    bind(Signal::SensorPower, Port::A, 2),
    bind(Signal::AccelSdi, Port::A, 3),
    bind(Signal::AccelSdo, Port::A, 4),
    bind(Signal::AccelSclk, Port::A, 5),
    bind(Signal::AdcSdo, Port::A, 6),
    bind(Signal::AdcSdi, Port::A, 7),
    bind(Signal::SdCs, Port::C, 1),
    bind(Signal::SdSdi, Port::C, 2),
    bind(Signal::SdSclk, Port::C, 3),
    bind(Signal::SdSdo, Port::C, 4),
    bind(Signal::AdcCs, Port::C, 6),
    bind(Signal::AccelCs, Port::C, 7),
    bind(Signal::I2cScl, Port::D, 0),
    bind(Signal::I2cSda, Port::D, 1),
    bind(Signal::UartRx, Port::E, 1),
    bind(Signal::AdcSclk, Port::G, 2),
];

/// Sensor supply (PA2, active high) off, chip selects of the SD card (PC1),
/// the ADC (PC6) and the accelerometer (PC7) released.
const WIMU_PORT_INIT: &[PortInit] = &avr_25mm_port_init(0x00, bit(1) | bit(6) | bit(7));

/// WImu revision 3A: ADXL345 accelerometer, AD7490 ADC and a microSD card.
pub static WIMU_REV3_A: Board = Board {
    name: "wimu_rev3_a",
    mcu: Mcu::Avr,
    radio: Some(Radio::Bluetooth),
    band: None,
    pins: WIMU_PINS,
    leds: None,
    sensor_power: Some(SensorPower {
        pin: PinId::new(Port::A, 2),
        active_low: false,
    }),
    port_init: WIMU_PORT_INIT,
    sleep: SLEEP,
    radio_interrupt: None,
    accel: Some(SpiPins {
        cs: PinId::new(Port::C, 7),
        sclk: PinId::new(Port::A, 5),
        sdi: PinId::new(Port::A, 3),
        sdo: PinId::new(Port::A, 4),
    }),
    adc: Some(SpiPins {
        cs: PinId::new(Port::C, 6),
        sclk: PinId::new(Port::G, 2),
        sdi: PinId::new(Port::A, 7),
        sdo: PinId::new(Port::A, 6),
    }),
    sd: Some(SpiPins {
        cs: PinId::new(Port::C, 1),
        sclk: PinId::new(Port::C, 3),
        sdi: PinId::new(Port::C, 2),
        sdo: PinId::new(Port::C, 4),
    }),
    has_hardware_i2c: true,
    has_tosc1_crystal: true,
    tick_dv: None,
};

const GLOVE_PINS: &[PinBinding] = &[
    bind(Signal::AccelCs, Port::A, 5),
    bind(Signal::AccelSclk, Port::A, 6),
    bind(Signal::AccelSdi, Port::A, 7),
    bind(Signal::I2cScl, Port::D, 0),
    bind(Signal::I2cSda, Port::D, 1),
    bind(Signal::UartRx, Port::E, 1),
    bind(Signal::AccelSdo, Port::G, 2),
];

/// Smart glove: a single ADXL345.
pub static SMART_GLOVE: Board = Board {
    name: "smart_glove",
    mcu: Mcu::Avr,
    radio: None,
    band: None,
    pins: GLOVE_PINS,
    leds: None,
    sensor_power: None,
    port_init: AVR_25MM_PORT_INIT,
    sleep: SLEEP,
    radio_interrupt: None,
    accel: Some(SpiPins {
        cs: PinId::new(Port::A, 5),
        sclk: PinId::new(Port::A, 6),
        sdi: PinId::new(Port::A, 7),
        sdo: PinId::new(Port::G, 2),
    }),
    adc: None,
    sd: None,
    has_hardware_i2c: true,
    has_tosc1_crystal: true,
    tick_dv: None,
};
