//! Motor stall watchdog
//!
//! A run normally ends when the limit switch for its direction fires. If
//! the switch is broken or the deck is jammed, nothing would ever stop the
//! motor. The watchdog bounds the length of a run.

use crate::config::SafetyConfig;
use crate::state::ErrorKind;

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Safety condition violated
    Fault(ErrorKind),
}

/// Run-length watchdog
///
/// Armed when a run starts, disarmed when it stops, advanced from the
/// periodic tick. A timeout of zero disables it.
#[derive(Debug, Clone)]
pub struct StallWatchdog {
    /// Maximum run length (ms), 0 = disabled
    timeout_ms: u32,
    /// Time since the watchdog was armed (ms)
    elapsed_ms: u32,
    /// A run is in progress
    armed: bool,
}

impl StallWatchdog {
    /// Create a disarmed watchdog
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            elapsed_ms: 0,
            armed: false,
        }
    }

    /// Create a watchdog from safety configuration
    pub const fn from_config(config: &SafetyConfig) -> Self {
        Self::new(config.stall_timeout_ms)
    }

    /// Check if the watchdog can ever fire
    pub fn is_enabled(&self) -> bool {
        self.timeout_ms > 0
    }

    /// Check if a run is being timed
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start timing a run
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed_ms = 0;
    }

    /// Stop timing
    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_ms = 0;
    }

    /// Update time tracking
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since last update
    pub fn update_time(&mut self, delta_ms: u32) {
        if self.armed {
            self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        }
    }

    /// Check whether the current run has exceeded the timeout
    pub fn check(&self) -> SafetyStatus {
        if self.armed && self.is_enabled() && self.elapsed_ms >= self.timeout_ms {
            return SafetyStatus::Fault(ErrorKind::MotorStallTimeout);
        }

        SafetyStatus::Ok
    }

    /// Configured timeout (ms)
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_fires() {
        let mut watchdog = StallWatchdog::new(100);
        watchdog.update_time(1000);
        assert_eq!(watchdog.check(), SafetyStatus::Ok);
        assert_eq!(watchdog.elapsed_ms, 0);
    }

    #[test]
    fn test_fires_at_timeout() {
        let mut watchdog = StallWatchdog::new(300);
        watchdog.arm();

        watchdog.update_time(100);
        watchdog.update_time(100);
        assert_eq!(watchdog.check(), SafetyStatus::Ok);

        watchdog.update_time(100);
        assert_eq!(
            watchdog.check(),
            SafetyStatus::Fault(ErrorKind::MotorStallTimeout)
        );
    }

    #[test]
    fn test_disarm_resets() {
        let mut watchdog = StallWatchdog::new(300);
        watchdog.arm();
        watchdog.update_time(250);
        watchdog.disarm();
        watchdog.arm();
        watchdog.update_time(100);
        assert_eq!(watchdog.check(), SafetyStatus::Ok);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let mut watchdog = StallWatchdog::from_config(&SafetyConfig {
            stall_timeout_ms: 0,
        });
        assert!(!watchdog.is_enabled());

        watchdog.arm();
        watchdog.update_time(u32::MAX);
        assert_eq!(watchdog.check(), SafetyStatus::Ok);
    }

    #[test]
    fn test_elapsed_saturates() {
        let mut watchdog = StallWatchdog::new(u32::MAX);
        watchdog.arm();
        watchdog.update_time(u32::MAX);
        watchdog.update_time(10);
        assert_eq!(watchdog.elapsed_ms, u32::MAX);
    }
}
