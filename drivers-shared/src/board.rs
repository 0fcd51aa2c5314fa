use bitvec::prelude::*;

use crate::{
    pins::{Direction, PinBinding, PinId, Port, PortIo, Signal, NUM_PORTS, PINS_PER_PORT},
    sleep::SleepMode,
    Error,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mcu {
    /// ATmega128
    Avr,
    /// 8051 core of the nRF9E5
    Nrf8051,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Radio {
    Nrf9e5,
    Nrf905,
    Cc2420,
    Bluetooth,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    Mhz433,
    Mhz868,
}

impl Band {
    /// HFREQ_PLL bit of the nRF905/nRF9E5 RF configuration.
    pub const fn hfreq_pll(self) -> u8 {
        match self {
            Band::Mhz433 => 0,
            Band::Mhz868 => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPolarity {
    /// 25 mm boards: the LED lights when the line goes high.
    ActiveHigh,
    /// 10 mm boards: the LED lights when the line goes low.
    ActiveLow,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Leds {
    /// Indexed by LED number. LED 0 is the one closest to the board edge.
    pub pins: &'static [PinId],
    pub polarity: LedPolarity,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorPower {
    pub pin: PinId,
    pub active_low: bool,
}

/// Reset state of one port, applied by [`Board::init`] to minimise leakage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortInit {
    pub port: Port,
    pub out: u8,
    /// One bit per pin, set for outputs, whatever the MCU's own DDR convention.
    pub dir: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepModes {
    /// Deepest mode the radio interrupt can wake the MCU from.
    pub radio: SleepMode,
    /// Deepest mode the second timer can wake the MCU from.
    pub delay_s: SleepMode,
    /// Deepest mode the millisecond timer can wake the MCU from, when it differs
    /// from the MCU default.
    pub delay_ms: Option<SleepMode>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Low,
    Any,
    Falling,
    Rising,
}

impl Edge {
    /// ISCn1:ISCn0 encoding of the AVR external interrupt sense control.
    pub const fn isc_bits(self) -> u8 {
        match self {
            Edge::Low => 0b00,
            Edge::Any => 0b01,
            Edge::Falling => 0b10,
            Edge::Rising => 0b11,
        }
    }
}

/// External interrupt the radio raises on packet reception.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExtInterrupt {
    /// INTn line number (0..=7 on the ATmega128).
    pub line: u8,
    pub edge: Edge,
    pub signal: Signal,
}

/// Pins of a bit-banged SPI bus. `sdi`/`sdo` are named from the device side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiPins {
    pub cs: PinId,
    pub sclk: PinId,
    pub sdi: PinId,
    pub sdo: PinId,
}

impl SpiPins {
    pub const fn all(&self) -> [PinId; 4] {
        [self.cs, self.sclk, self.sdi, self.sdo]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Board {
    pub name: &'static str,
    pub mcu: Mcu,
    pub radio: Option<Radio>,
    pub band: Option<Band>,
    pub pins: &'static [PinBinding],
    pub leds: Option<Leds>,
    pub sensor_power: Option<SensorPower>,
    pub port_init: &'static [PortInit],
    pub sleep: SleepModes,
    pub radio_interrupt: Option<ExtInterrupt>,
    pub accel: Option<SpiPins>,
    pub adc: Option<SpiPins>,
    pub sd: Option<SpiPins>,
    pub has_hardware_i2c: bool,
    pub has_tosc1_crystal: bool,
    /// Low-frequency tick divider (nRF9E5 only).
    pub tick_dv: Option<u8>,
}

impl Board {
    pub fn pin(&self, signal: Signal) -> Option<PinId> {
        self.pins
            .iter()
            .find(|b| b.signal == signal)
            .map(|b| b.pin)
    }

    /// Checks that no two signals share a pin and that every pin referenced by
    /// the LED, sensor power and peripheral descriptions is in the pin table.
    pub fn validate(&self) -> Result<(), Error> {
        let mut used: BitArr!(for NUM_PORTS * PINS_PER_PORT, in u8) = BitArray::ZERO;

        for (i, binding) in self.pins.iter().enumerate() {
            let slot = binding.pin.slot();
            if used[slot] {
                let first = self.pins[..i]
                    .iter()
                    .find(|b| b.pin == binding.pin)
                    .map(|b| b.signal)
                    .unwrap_or(binding.signal);
                return Err(Error::PinConflict {
                    pin: binding.pin,
                    first,
                    second: binding.signal,
                });
            }
            used.set(slot, true);
        }

        let leds = self.leds.iter().flat_map(|l| l.pins.iter().copied());
        let power = self.sensor_power.iter().map(|p| p.pin);
        let buses = [self.accel, self.adc, self.sd]
            .into_iter()
            .flatten()
            .flat_map(|bus| bus.all());
        let irq = self
            .radio_interrupt
            .iter()
            .filter_map(|irq| self.pin(irq.signal));

        for pin in leds.chain(power).chain(buses).chain(irq) {
            if !used[pin.slot()] {
                return Err(Error::UnlistedPin(pin));
            }
        }
        Ok(())
    }

    /// Puts every port into the board's low-power reset state.
    pub fn init(&self, io: &impl PortIo) {
        log::debug!("board {} init", self.name);
        for p in self.port_init {
            io.write_port(p.port, p.out, p.dir);
        }
    }

    pub fn sensors_enable(&self, io: &impl PortIo) {
        if let Some(power) = self.sensor_power {
            io.set_direction(power.pin, Direction::Output);
            io.write_pin(power.pin, !power.active_low);
        }
    }

    pub fn sensors_disable(&self, io: &impl PortIo) {
        if let Some(power) = self.sensor_power {
            io.write_pin(power.pin, power.active_low);
        }
    }

    /// Makes the LED pins outputs with every LED off.
    pub fn led_init(&self, io: &impl PortIo) {
        let Some(leds) = self.leds else {
            return;
        };
        for &pin in leds.pins {
            io.set_direction(pin, Direction::Output);
            io.write_pin(pin, leds.polarity == LedPolarity::ActiveLow);
        }
    }

    pub fn led_enable(&self, io: &impl PortIo, n: usize) {
        if let Some((pin, polarity)) = self.led(n) {
            io.write_pin(pin, polarity == LedPolarity::ActiveHigh);
        }
    }

    pub fn led_disable(&self, io: &impl PortIo, n: usize) {
        if let Some((pin, polarity)) = self.led(n) {
            io.write_pin(pin, polarity == LedPolarity::ActiveLow);
        }
    }

    pub fn led_toggle(&self, io: &impl PortIo, n: usize) {
        if let Some((pin, _)) = self.led(n) {
            io.toggle_pin(pin);
        }
    }

    fn led(&self, n: usize) -> Option<(PinId, LedPolarity)> {
        let leds = self.leds?;
        leds.pins.get(n).map(|&pin| (pin, leds.polarity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{boards, testing::FakePorts};

    #[test]
    fn init_writes_every_port() {
        let io = FakePorts::default();
        boards::NRF905_REVA_433.init(&io);
        assert_eq!(io.port(Port::A), (0x04, 0xff));
        assert_eq!(io.port(Port::D), (0x03, 0xfc));
        assert_eq!(io.port(Port::E), (0x02, 0xfd));
        assert_eq!(io.port(Port::G), (0x00, 0x1f));
    }

    #[test]
    fn sensor_power_follows_polarity() {
        let io = FakePorts::default();
        let pc1 = PinId::new(Port::C, 1);
        boards::CC2420_REVA.sensors_enable(&io);
        assert!(io.is_output(pc1));
        assert!(!io.output(pc1));
        boards::CC2420_REVA.sensors_disable(&io);
        assert!(io.output(pc1));

        let p06 = PinId::new(Port::P0, 6);
        boards::NRF9E5_433.sensors_enable(&io);
        assert!(io.output(p06));
        boards::NRF9E5_433.sensors_disable(&io);
        assert!(!io.output(p06));
    }

    #[test]
    fn leds_on_25mm_boards_are_active_high() {
        let io = FakePorts::default();
        let board = &boards::NRF905_REVA_868;
        let (led0, led1) = (PinId::new(Port::G, 1), PinId::new(Port::G, 0));
        board.led_init(&io);
        assert!(io.is_output(led0) && io.is_output(led1));
        assert!(!io.output(led0) && !io.output(led1));

        board.led_enable(&io, 1);
        assert!(io.output(led1));
        board.led_toggle(&io, 0);
        assert!(io.output(led0));
        board.led_disable(&io, 1);
        assert!(!io.output(led1));
    }

    #[test]
    fn leds_on_10mm_boards_are_active_low() {
        let io = FakePorts::default();
        let board = &boards::NRF9E5_868;
        let led = PinId::new(Port::P0, 0);
        board.led_init(&io);
        assert!(io.output(led));
        board.led_enable(&io, 0);
        assert!(!io.output(led));
    }

    #[test]
    fn missing_leds_are_ignored() {
        let io = FakePorts::default();
        boards::BLUETOOTH_REV1_0.led_init(&io);
        boards::BLUETOOTH_REV1_0.led_toggle(&io, 0);
        boards::NRF905_REVA_433.led_enable(&io, 7);
        assert!(io.log().is_empty());
    }

    #[test]
    fn edge_encoding() {
        assert_eq!(Edge::Rising.isc_bits(), 0b11);
        assert_eq!(Edge::Low.isc_bits(), 0b00);
    }
}
