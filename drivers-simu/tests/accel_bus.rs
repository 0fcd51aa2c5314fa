//! The bit-banged SPI master against the simulated ADXL345.

use drivers_shared::spi::{PortSpi, RegisterAccess};
use drivers_simu::{
    adxl345::{Adxl345, DataFormat, PowerMode, Range, Reading, Register},
    boards,
    pins::{PinId, Port, PortIo},
    Context,
};

const F_CPU: u32 = 4_000_000;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn init_releases_chip_select() {
    init_logger();
    let ctx = Context::new(&boards::WIMU_REV3_A, F_CPU).unwrap();
    let mut spi = ctx.accel_spi().unwrap();
    spi.init().unwrap();
    assert!(ctx.ports.read_pin(PinId::new(Port::C, 7)));
    assert!(ctx.ports.read_pin(PinId::new(Port::A, 5)));
    assert!(!ctx.ports.read_pin(PinId::new(Port::A, 3)));
}

#[test]
fn device_id_over_bit_banged_bus() {
    init_logger();
    let ctx = Context::new(&boards::WIMU_REV3_A, F_CPU).unwrap();
    let mut spi = ctx.accel_spi().unwrap();
    spi.init().unwrap();
    assert_eq!(spi.read(Register::DevId.addr()).unwrap(), 0xE5);
}

#[test]
fn write_then_read_back() {
    init_logger();
    let ctx = Context::new(&boards::SMART_GLOVE, F_CPU).unwrap();
    let dev = ctx.accel.clone().unwrap();
    let mut spi = ctx.accel_spi().unwrap();
    spi.init().unwrap();

    spi.write(Register::ThreshAct.addr(), 0x3c).unwrap();
    assert_eq!(dev.register(Register::ThreshAct), 0x3c);
    assert_eq!(spi.read(Register::ThreshAct.addr()).unwrap(), 0x3c);

    // Read-only registers keep their value.
    spi.write(Register::DevId.addr(), 0x00).unwrap();
    assert_eq!(spi.read(Register::DevId.addr()).unwrap(), 0xE5);
}

#[test]
fn missing_device_reads_floating_bus() {
    init_logger();
    let ctx = Context::new(&boards::WIMU_REV3_A, F_CPU).unwrap();
    let pins = ctx.board.adc.unwrap();
    let mut spi = PortSpi::on_port(&ctx.ports, &pins);
    spi.init().unwrap();
    assert_eq!(spi.read(0x00).unwrap(), 0xFF);
    assert!(spi.dout().unwrap());
}

#[test]
fn burst_read_of_axes() {
    init_logger();
    let ctx = Context::new(&boards::WIMU_REV3_A, F_CPU).unwrap();
    let dev = ctx.accel.clone().unwrap();
    dev.set_axes(Reading {
        x: 250,
        y: -3,
        z: -32768,
    });

    let mut spi = ctx.accel_spi().unwrap();
    spi.init().unwrap();
    let mut raw = [0u8; 6];
    spi.read_registers(Register::DataX0.addr(), &mut raw).unwrap();
    assert_eq!(raw, [0xfa, 0x00, 0xfd, 0xff, 0x00, 0x80]);
}

#[test]
fn driver_brings_up_measurement() {
    init_logger();
    let ctx = Context::new(&boards::WIMU_REV3_A, F_CPU).unwrap();
    let dev = ctx.accel.clone().unwrap();
    let mut spi = ctx.accel_spi().unwrap();
    spi.init().unwrap();

    let mut accel = Adxl345::new(&mut spi);
    accel.check_device_id().unwrap();
    accel
        .set_data_format(DataFormat::new().with_full_res(true).with_range(Range::G2))
        .unwrap();
    accel.set_power_mode(PowerMode::Measure).unwrap();
    assert_eq!(dev.power_mode(), Some(PowerMode::Measure));
    assert_eq!(dev.register(Register::DataFormat), 0x08);

    dev.set_axes(Reading { x: 1, y: 2, z: 256 });
    assert_eq!(accel.reading().unwrap(), Reading { x: 1, y: 2, z: 256 });
}

#[test]
fn activity_detection_leaves_device_asleep() {
    init_logger();
    let ctx = Context::new(&boards::WIMU_REV3_A, F_CPU).unwrap();
    let dev = ctx.accel.clone().unwrap();
    dev.raise(0x10);

    let mut spi = ctx.accel_spi().unwrap();
    spi.init().unwrap();
    let mut accel = Adxl345::new(&mut spi);
    accel
        .configure_activity_detection(Default::default())
        .unwrap();

    assert_eq!(dev.power_mode(), Some(PowerMode::Sleep));
    assert_eq!(dev.register(Register::IntEnable), 0x10);
    assert_eq!(dev.register(Register::IntMap), 0x08);
    assert_eq!(dev.register(Register::ActInactCtl), 0xF0);
    // INT_SOURCE was read during setup, which cleared the pending activity.
    assert_eq!(dev.register(Register::IntSource), 0x02);
}
