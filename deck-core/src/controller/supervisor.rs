//! Periodic supervision schedule
//!
//! Decides when the linked-power policy should run from the tick path.
//! Edge-driven runs go through the dispatcher and only restart the period.
//! With an interval of zero the policy never runs from the tick path.

use crate::config::SupervisorConfig;

/// Interval timer for [`DeckController::run`](super::DeckController::run)
#[derive(Debug, Clone)]
pub struct Supervisor {
    enabled: bool,
    periodic: bool,
    interval_ms: u32,
    elapsed_ms: u32,
}

impl Supervisor {
    pub const fn new(config: &SupervisorConfig) -> Self {
        Self {
            enabled: config.enabled,
            periodic: config.is_periodic(),
            interval_ms: config.interval_ms,
            elapsed_ms: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Update time tracking
    ///
    /// Returns `true` when a policy run is due. The period restarts on
    /// every due run.
    pub fn update_time(&mut self, delta_ms: u32) -> bool {
        if !self.periodic {
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms = 0;
            return true;
        }

        false
    }

    /// Restart the period after an out-of-band run
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_every_interval() {
        let mut supervisor = Supervisor::new(&SupervisorConfig {
            enabled: true,
            interval_ms: 300,
        });

        assert!(!supervisor.update_time(100));
        assert!(!supervisor.update_time(100));
        assert!(supervisor.update_time(100));
        assert!(!supervisor.update_time(100));
    }

    #[test]
    fn test_reset_restarts_period() {
        let mut supervisor = Supervisor::new(&SupervisorConfig {
            enabled: true,
            interval_ms: 200,
        });

        supervisor.update_time(100);
        supervisor.reset();
        assert!(!supervisor.update_time(100));
        assert!(supervisor.update_time(100));
    }

    #[test]
    fn test_disabled_never_due() {
        let mut supervisor = Supervisor::new(&SupervisorConfig {
            enabled: false,
            interval_ms: 100,
        });

        assert!(!supervisor.is_enabled());
        assert!(!supervisor.update_time(10_000));
    }

    #[test]
    fn test_zero_interval_never_due() {
        let mut supervisor = Supervisor::new(&SupervisorConfig::default());

        assert!(supervisor.is_enabled());
        for _ in 0..100 {
            assert!(!supervisor.update_time(100));
        }
    }
}
