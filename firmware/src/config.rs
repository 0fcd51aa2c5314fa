//! Build-time configuration of the node.

use drivers::{board::Board, boards, clock::cklfcon_for};

/// CPU clock in Hz. Must be one of the rates the nRF9E5 clock divider can
/// produce, anything else fails the build.
pub const F_CPU: u32 = 4_000_000;
pub const CKLFCON: u8 = cklfcon_for(F_CPU);

/// Time the sensor supply needs to settle after power-up, in ms.
pub const SENSOR_STARTUP_MS: u16 = 5;
/// Accelerometer polling period, in ms.
pub const POLL_PERIOD_MS: u16 = 100;

/// Defines `BOARD` from the one enabled board feature. The default feature
/// counts too, so other boards need `--no-default-features`.
macro_rules! select_board {
    (@pick $feature:literal => $board:ident) => {
        &boards::$board
    };
    (@pick $feature:literal => $board:ident, $($rest:literal => $rest_board:ident),+) => {
        if cfg!(feature = $feature) {
            &boards::$board
        } else {
            select_board!(@pick $($rest => $rest_board),+)
        }
    };
    (@exclusive) => {};
    (@exclusive $first:literal $(, $rest:literal)*) => {
        $(
            #[cfg(all(feature = $first, feature = $rest))]
            compile_error!(concat!(
                "board features \"", $first, "\" and \"", $rest,
                "\" are exclusive, build with --no-default-features"
            ));
        )*
        select_board!(@exclusive $($rest),*);
    };
    ($($feature:literal => $board:ident),+ $(,)?) => {
        pub static BOARD: &Board = select_board!(@pick $($feature => $board),+);

        #[cfg(not(any($(feature = $feature),+)))]
        compile_error!("enable exactly one board feature");

        select_board!(@exclusive $($feature),+);
    };
}

select_board! {
    "nrf905-reva-433" => NRF905_REVA_433,
    "nrf905-reva-868" => NRF905_REVA_868,
    "cc2420-reva" => CC2420_REVA,
    "bluetooth-rev1-0" => BLUETOOTH_REV1_0,
    "wimu-rev3-a" => WIMU_REV3_A,
    "smart-glove" => SMART_GLOVE,
}
