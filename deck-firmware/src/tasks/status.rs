//! Status indicator task
//!
//! Mirrors the motor-running flag on the status LED and blinks the
//! auxiliary LED while a fault is latched.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use deck_core::state::RuntimeState;

use crate::board::DeckIndicator;
use crate::channels::FAULT_STATE;

/// Refresh period, also the blink half-period
const REFRESH_INTERVAL_MS: u64 = 250;

#[embassy_executor::task]
pub async fn status_task(mut indicator: DeckIndicator, runtime: &'static RuntimeState) {
    info!("Status task started");

    let mut fault = None;

    loop {
        match select(Timer::after_millis(REFRESH_INTERVAL_MS), FAULT_STATE.wait()).await {
            Either::First(()) => {}
            Either::Second(state) => {
                fault = state;
                debug!("Indicator fault state: {}", fault);
            }
        }

        indicator.update(runtime.is_motor_running(), fault.is_some());
    }
}
