//! PWM output abstraction
//!
//! A single PWM channel driven as a raw compare level. The level is in
//! counter units of the configured wrap value: `0` is always off and any
//! level above the wrap value keeps the output permanently on.

/// PWM channel with a settable duty level
pub trait PwmOutput {
    /// Set the compare level
    fn set_duty(&mut self, level: u16);

    /// Get the compare level last written
    fn duty(&self) -> u16;

    /// Convenience for `set_duty(0)`
    fn disable(&mut self) {
        self.set_duty(0);
    }
}
