//! Periodic tick source
//!
//! The deck task uses the tick to advance the stall watchdog, to schedule
//! linked-power supervision and to re-check the target limit of a run.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 100;

/// Uptime in milliseconds at the latest tick
///
/// A signal keeps only the newest value; the receiver works from the
/// difference between consecutive timestamps, so a skipped tick is not lost.
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

#[embassy_executor::task]
pub async fn tick_task() {
    debug!("Tick task started, {} ms period", TICK_INTERVAL_MS);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(Instant::now().as_millis() as u32);
    }
}
