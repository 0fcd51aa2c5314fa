use drivers::{
    adxl345::{Adxl345, DataFormat, PowerMode, Range, Reading},
    Context,
};
use drivers_shared::{spi::RegisterAccess, Error};
use embedded_hal::blocking::delay::DelayMs;

use crate::config::POLL_PERIOD_MS;

/// Checks the device and starts measuring with full resolution at ±2 g.
pub fn bring_up<B: RegisterAccess>(accel: &mut Adxl345<B>) -> Result<(), Error> {
    accel.check_device_id()?;
    accel.set_power_mode(PowerMode::Standby)?;
    accel.set_data_format(DataFormat::new().with_full_res(true).with_range(Range::G2))?;
    accel.set_power_mode(PowerMode::Measure)
}

/// Polls the accelerometer forever, blinking LED 0 on every sample. Returns
/// right away on boards without one.
pub fn poll(ctx: &Context) -> Result<(), Error> {
    let Some(mut spi) = ctx.accel_spi() else {
        log::info!("{} has no accelerometer", ctx.board.name);
        return Ok(());
    };
    spi.init()?;

    let mut accel = Adxl345::new(spi);
    bring_up(&mut accel)?;
    log::info!("accelerometer up");

    let mut delay = ctx.delay;
    loop {
        let Reading { x, y, z } = accel.reading()?;
        log::debug!("x {} y {} z {}", x, y, z);
        ctx.board.led_toggle(&ctx.ports, 0);
        delay.delay_ms(POLL_PERIOD_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivers::{adxl345::Register, boards};

    #[test]
    fn bring_up_on_simulated_board() {
        let ctx = Context::new(&boards::WIMU_REV3_A, crate::config::F_CPU).unwrap();
        let dev = ctx.accel.clone().unwrap();
        let mut spi = ctx.accel_spi().unwrap();
        spi.init().unwrap();

        let mut accel = Adxl345::new(&mut spi);
        bring_up(&mut accel).unwrap();
        assert_eq!(dev.power_mode(), Some(PowerMode::Measure));
        assert_eq!(dev.register(Register::DataFormat), 0x08);
    }

    #[test]
    fn bring_up_fails_without_device() {
        let ctx = Context::new(&boards::WIMU_REV3_A, crate::config::F_CPU).unwrap();
        // The ADC bus has nothing that answers like an ADXL345.
        let pins = ctx.board.adc.unwrap();
        let mut spi = drivers_shared::spi::PortSpi::on_port(&ctx.ports, &pins);
        spi.init().unwrap();

        let mut accel = Adxl345::new(&mut spi);
        assert_eq!(
            bring_up(&mut accel),
            Err(Error::DeviceId {
                expected: 0xE5,
                found: 0xFF
            })
        );
    }
}
