//! Tyndall 25 mm ATmega128 module with an nRF905 radio, revA.

use crate::{
    board::{Band, Board, Edge, ExtInterrupt, Mcu, Radio, SleepModes},
    pins::{bind, PinBinding, Port, Signal},
    sleep::SleepMode,
};

use super::{AVR_25MM_LEDS, AVR_25MM_PORT_INIT, AVR_25MM_SENSOR_POWER};

const PINS: &[PinBinding] = &[
    bind(Signal::UsbSensorPower, Port::A, 2),
    bind(Signal::RadioSpiCsn, Port::B, 0),
    bind(Signal::RadioSpiSclk, Port::B, 1),
    bind(Signal::RadioSpiMosi, Port::B, 2),
    bind(Signal::RadioSpiMiso, Port::B, 3),
    bind(Signal::RfPwrUp, Port::B, 5),
    bind(Signal::BatteryMonitor, Port::B, 6),
    bind(Signal::SensorPower, Port::C, 1),
    bind(Signal::I2cScl, Port::D, 0),
    bind(Signal::I2cSda, Port::D, 1),
    bind(Signal::RfTrxCe, Port::D, 4),
    bind(Signal::RfTxEn, Port::D, 5),
    bind(Signal::RfDr, Port::D, 7),
    bind(Signal::UartRx, Port::E, 1),
    bind(Signal::RfAm, Port::E, 4),
    bind(Signal::RfCd, Port::E, 5),
    bind(Signal::Led1, Port::G, 0),
    bind(Signal::Led0, Port::G, 1),
];

const fn board(name: &'static str, band: Band) -> Board {
    Board {
        name,
        mcu: Mcu::Avr,
        radio: Some(Radio::Nrf905),
        band: Some(band),
        pins: PINS,
        leds: Some(AVR_25MM_LEDS),
        sensor_power: Some(AVR_25MM_SENSOR_POWER),
        port_init: AVR_25MM_PORT_INIT,
        sleep: SleepModes {
            radio: SleepMode::Idle,
            delay_s: SleepMode::Deep,
            delay_ms: None,
        },
        // Address match raises INT4.
        radio_interrupt: Some(ExtInterrupt {
            line: 4,
            edge: Edge::Rising,
            signal: Signal::RfAm,
        }),
        accel: None,
        adc: None,
        sd: None,
        has_hardware_i2c: true,
        has_tosc1_crystal: true,
        tick_dv: None,
    }
}

pub static NRF905_REVA_433: Board = board("25_nrf905_revA_433", Band::Mhz433);
pub static NRF905_REVA_868: Board = board("25_nrf905_revA_868", Band::Mhz868);
