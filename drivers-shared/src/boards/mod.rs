//! Board variants.
//!
//! Applications pick one of these at start-up, either by name or through a
//! cargo feature, and pass it to the driver context.

mod bluetooth_25mm;
mod cc2420_25mm;
mod imu;
mod nrf905_25mm;
mod nrf9e5_10mm;

pub use bluetooth_25mm::BLUETOOTH_REV1_0;
pub use cc2420_25mm::CC2420_REVA;
pub use imu::{SMART_GLOVE, WIMU_REV3_A};
pub use nrf905_25mm::{NRF905_REVA_433, NRF905_REVA_868};
pub use nrf9e5_10mm::{NRF9E5_433, NRF9E5_868};

use crate::{
    bit,
    board::{Board, LedPolarity, Leds, PortInit, SensorPower},
    pins::{PinId, Port},
    Error,
};

pub static ALL: [&Board; 8] = [
    &NRF9E5_433,
    &NRF9E5_868,
    &NRF905_REVA_433,
    &NRF905_REVA_868,
    &CC2420_REVA,
    &BLUETOOTH_REV1_0,
    &WIMU_REV3_A,
    &SMART_GLOVE,
];

pub fn by_name(name: &str) -> Result<&'static Board, Error> {
    ALL.iter()
        .copied()
        .find(|b| b.name.eq_ignore_ascii_case(name))
        .ok_or(Error::UnknownBoard)
}

/// LED 0 (closest to the board edge) on PG1, LED 1 on PG0.
const AVR_25MM_LEDS: Leds = Leds {
    pins: &[PinId::new(Port::G, 1), PinId::new(Port::G, 0)],
    polarity: LedPolarity::ActiveHigh,
};

const AVR_25MM_SENSOR_POWER: SensorPower = SensorPower {
    pin: PinId::new(Port::C, 1),
    active_low: true,
};

/// Low-power state of the 25 mm ATmega128 boards:
///  - PB0 is the active low chip select of the radio SPI.
///  - PD0 and PD1 are I2C lines with pull-ups.
///  - PE1 is UART RX.
///  - Port G only has 5 pins.
///
/// Ports A and C carry the sensor lines and differ between boards.
const fn avr_25mm_port_init(porta: u8, portc: u8) -> [PortInit; 7] {
    [
        PortInit {
            port: Port::A,
            out: porta,
            dir: 0xff,
        },
        PortInit {
            port: Port::B,
            out: bit(0),
            dir: 0xff,
        },
        PortInit {
            port: Port::C,
            out: portc,
            dir: 0xff,
        },
        PortInit {
            port: Port::D,
            out: bit(0) | bit(1),
            dir: !(bit(0) | bit(1)),
        },
        PortInit {
            port: Port::E,
            out: bit(1),
            dir: !bit(1),
        },
        PortInit {
            port: Port::F,
            out: 0x00,
            dir: 0xff,
        },
        PortInit {
            port: Port::G,
            out: 0x00,
            dir: 0x1f,
        },
    ]
}

/// PC1 high keeps the active low sensor supply off. PA2 idles high for the
/// USB programming board.
const AVR_25MM_PORT_INIT: &[PortInit] = &avr_25mm_port_init(bit(2), bit(1));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::{Band, Mcu, Radio},
        pins::{bind, PinBinding, PortIo, Signal},
        sleep::SleepMode,
        testing::FakePorts,
    };

    #[test]
    fn every_board_validates() {
        for board in ALL {
            assert_eq!(board.validate(), Ok(()), "{}", board.name);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("25_nrf905_revA_868").unwrap().band, Some(Band::Mhz868));
        assert_eq!(by_name("WIMU_REV3_A").unwrap().name, "wimu_rev3_a");
        assert_eq!(by_name("25_nrf905_revB_433"), Err(Error::UnknownBoard));
    }

    #[test]
    fn band_variants_only_differ_in_band() {
        for (a, b) in [(&NRF9E5_433, &NRF9E5_868), (&NRF905_REVA_433, &NRF905_REVA_868)] {
            assert_eq!(a.band.unwrap().hfreq_pll(), 0);
            assert_eq!(b.band.unwrap().hfreq_pll(), 1);
            assert_eq!(a.pins, b.pins);
            assert_eq!(a.port_init, b.port_init);
            assert_eq!(a.sleep, b.sleep);
        }
    }

    #[test]
    fn family_tags() {
        assert_eq!(NRF9E5_433.mcu, Mcu::Nrf8051);
        assert_eq!(NRF9E5_433.tick_dv, Some(124));
        assert_eq!(CC2420_REVA.radio, Some(Radio::Cc2420));
        assert_eq!(CC2420_REVA.sleep.radio, SleepMode::PowerDown);
        assert!(!CC2420_REVA.has_hardware_i2c);
        assert!(!CC2420_REVA.has_tosc1_crystal);
        assert_eq!(NRF905_REVA_433.radio_interrupt.unwrap().line, 4);
        assert_eq!(BLUETOOTH_REV1_0.radio, Some(Radio::Bluetooth));
        assert!(BLUETOOTH_REV1_0.radio_interrupt.is_none());
    }

    #[test]
    fn radio_pins() {
        let b = &NRF905_REVA_433;
        assert_eq!(b.pin(Signal::RfTrxCe), Some(PinId::new(Port::D, 4)));
        assert_eq!(b.pin(Signal::RfPwrUp), Some(PinId::new(Port::B, 5)));
        assert_eq!(b.pin(Signal::RfDr), Some(PinId::new(Port::D, 7)));
        assert_eq!(b.pin(Signal::RfFifoP), None);
        assert_eq!(CC2420_REVA.pin(Signal::RfFifoP), Some(PinId::new(Port::D, 0)));
    }

    #[test]
    fn wimu_buses() {
        let accel = WIMU_REV3_A.accel.unwrap();
        assert_eq!(accel.cs, PinId::new(Port::C, 7));
        assert_eq!(accel.sdo, PinId::new(Port::A, 4));
        assert_eq!(WIMU_REV3_A.adc.unwrap().sclk, PinId::new(Port::G, 2));
        assert_eq!(WIMU_REV3_A.sd.unwrap().cs, PinId::new(Port::C, 1));
        assert_eq!(SMART_GLOVE.accel.unwrap().sdo, PinId::new(Port::G, 2));
    }

    #[test]
    fn port_init_values() {
        let d = AVR_25MM_PORT_INIT.iter().find(|p| p.port == Port::D).unwrap();
        assert_eq!((d.out, d.dir), (0x03, 0xfc));
        assert_eq!(AVR_25MM_PORT_INIT[0].out, 0x04);
        assert_eq!(CC2420_REVA.port_init[0].out, 0x00);
        assert_eq!(NRF9E5_868.port_init[0].out, 0x29);
        let c = WIMU_REV3_A.port_init.iter().find(|p| p.port == Port::C).unwrap();
        assert_eq!(c.out, 0xc2);
    }

    #[test]
    fn sensor_supply_is_off_after_init() {
        for board in ALL {
            let Some(power) = board.sensor_power else {
                continue;
            };
            let io = FakePorts::default();
            board.init(&io);
            assert_eq!(io.read_pin(power.pin), power.active_low, "{}", board.name);
            board.sensors_enable(&io);
            assert_eq!(io.read_pin(power.pin), !power.active_low, "{}", board.name);
        }
    }

    #[test]
    fn overlapping_pins_are_reported() {
        static PINS: [PinBinding; 3] = [
            bind(Signal::RfFifoP, Port::D, 0),
            bind(Signal::RfFifo, Port::D, 1),
            bind(Signal::I2cScl, Port::D, 0),
        ];
        let board = Board {
            name: "broken",
            pins: &PINS,
            ..CC2420_REVA
        };
        assert_eq!(
            board.validate(),
            Err(Error::PinConflict {
                pin: PinId::new(Port::D, 0),
                first: Signal::RfFifoP,
                second: Signal::I2cScl,
            })
        );
    }

    #[test]
    fn peripheral_pins_must_be_listed() {
        static PINS: [PinBinding; 1] = [bind(Signal::AccelCs, Port::A, 5)];
        let board = Board {
            name: "partial",
            pins: &PINS,
            ..SMART_GLOVE
        };
        assert_eq!(board.validate(), Err(Error::UnlistedPin(PinId::new(Port::A, 6))));
    }
}
