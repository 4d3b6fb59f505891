//! Status and auxiliary indicator LEDs
//!
//! The status LED mirrors the motor-running flag. The auxiliary ("bling")
//! LED is steady on once the system is ready and blinks while the
//! controller is faulted.

use deck_hal::OutputPin;

/// Pair of indicator LEDs, both active-high
pub struct StatusIndicator<S, B> {
    status: S,
    bling: B,
    /// Blink phase while faulted
    blink_on: bool,
}

impl<S: OutputPin, B: OutputPin> StatusIndicator<S, B> {
    /// Create the indicator in the "ready" pattern: status off, bling on
    pub fn new(mut status: S, mut bling: B) -> Self {
        status.set_low();
        bling.set_high();

        Self {
            status,
            bling,
            blink_on: true,
        }
    }

    /// Refresh both LEDs
    ///
    /// Call periodically; each call while `faulted` advances the blink by
    /// one phase.
    pub fn update(&mut self, running: bool, faulted: bool) {
        if running {
            self.status.set_high();
        } else {
            self.status.set_low();
        }

        if faulted {
            self.blink_on = !self.blink_on;
        } else {
            self.blink_on = true;
        }

        if self.blink_on {
            self.bling.set_high();
        } else {
            self.bling.set_low();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_ready_pattern() {
        let indicator = StatusIndicator::new(MockPin::new(), MockPin::new());
        assert!(!indicator.status.high);
        assert!(indicator.bling.high);
    }

    #[test]
    fn test_status_follows_running() {
        let mut indicator = StatusIndicator::new(MockPin::new(), MockPin::new());

        indicator.update(true, false);
        assert!(indicator.status.high);
        assert!(indicator.bling.high);

        indicator.update(false, false);
        assert!(!indicator.status.high);
    }

    #[test]
    fn test_bling_blinks_on_fault() {
        let mut indicator = StatusIndicator::new(MockPin::new(), MockPin::new());

        indicator.update(false, true);
        assert!(!indicator.bling.high);
        indicator.update(false, true);
        assert!(indicator.bling.high);
        indicator.update(false, true);
        assert!(!indicator.bling.high);

        // Fault cleared: steady on again
        indicator.update(false, false);
        assert!(indicator.bling.high);
        indicator.update(false, false);
        assert!(indicator.bling.high);
    }
}
