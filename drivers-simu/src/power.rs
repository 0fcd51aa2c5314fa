use std::time::Duration;

use drivers_shared::sleep::SleepMode;

/// There is no interrupt to wait for, so sleeping yields for a tick.
pub fn sleep(mode: SleepMode) {
    log::trace!("sleep ({})", mode.avr_name());
    std::thread::sleep(Duration::from_millis(1));
}
