//! Runtime state shared between the edge path and foreground tasks
//!
//! One instance lives for the whole process. The deck task mutates it
//! through the controller; the status task only reads it. All fields are
//! atomics so a `&'static RuntimeState` can be handed to both.

use portable_atomic::{AtomicBool, AtomicU16, Ordering};

use crate::config::MotorConfig;
use crate::traits::Direction;

/// Motor-running flag, manual-control flag and per-direction duty levels
#[derive(Debug)]
pub struct RuntimeState {
    motor_running: AtomicBool,
    manual_control: AtomicBool,
    motor_speed_open: AtomicU16,
    motor_speed_close: AtomicU16,
}

impl RuntimeState {
    /// Create runtime state with the given duty levels
    ///
    /// The motor starts stopped and manual control disengaged.
    pub const fn new(speed_open: u16, speed_close: u16) -> Self {
        Self {
            motor_running: AtomicBool::new(false),
            manual_control: AtomicBool::new(false),
            motor_speed_open: AtomicU16::new(speed_open),
            motor_speed_close: AtomicU16::new(speed_close),
        }
    }

    /// Create runtime state from motor configuration
    pub const fn from_config(motor: &MotorConfig) -> Self {
        Self::new(motor.speed_open, motor.speed_close)
    }

    /// Check if an actuation is underway
    pub fn is_motor_running(&self) -> bool {
        self.motor_running.load(Ordering::Acquire)
    }

    /// Atomically claim the motor
    ///
    /// Returns `false` if the motor was already running. This is the only
    /// way to set the running flag.
    pub fn try_claim_motor(&self) -> bool {
        self.motor_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Clear the running flag
    pub fn release_motor(&self) {
        self.motor_running.store(false, Ordering::Release);
    }

    /// Check if manual control is engaged
    pub fn is_manual_control(&self) -> bool {
        self.manual_control.load(Ordering::Acquire)
    }

    /// Engage manual control; returns `true` if the flag changed
    pub fn enable_manual_control(&self) -> bool {
        !self.manual_control.swap(true, Ordering::AcqRel)
    }

    /// Disengage manual control; returns `true` if the flag changed
    pub fn disable_manual_control(&self) -> bool {
        self.manual_control.swap(false, Ordering::AcqRel)
    }

    /// Configured duty level for a direction
    pub fn motor_speed(&self, direction: Direction) -> u16 {
        match direction {
            Direction::Open => self.motor_speed_open.load(Ordering::Relaxed),
            Direction::Close => self.motor_speed_close.load(Ordering::Relaxed),
        }
    }
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self::from_config(&MotorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_flags() {
        let state = RuntimeState::new(100, 200);
        assert!(!state.is_motor_running());
        assert!(!state.is_manual_control());
        assert_eq!(state.motor_speed(Direction::Open), 100);
        assert_eq!(state.motor_speed(Direction::Close), 200);
    }

    #[test]
    fn test_claim_is_exclusive() {
        let state = RuntimeState::default();

        assert!(state.try_claim_motor());
        assert!(state.is_motor_running());
        assert!(!state.try_claim_motor());

        state.release_motor();
        assert!(!state.is_motor_running());
        assert!(state.try_claim_motor());
    }

    #[test]
    fn test_manual_control_reports_change() {
        let state = RuntimeState::default();

        assert!(state.enable_manual_control());
        assert!(!state.enable_manual_control());
        assert!(state.is_manual_control());

        assert!(state.disable_manual_control());
        assert!(!state.disable_manual_control());
        assert!(!state.is_manual_control());
    }

    #[test]
    fn test_speeds_from_config() {
        let state = RuntimeState::default();
        assert_eq!(state.motor_speed(Direction::Open), 10000);

        let state = RuntimeState::from_config(&MotorConfig {
            speed_open: 4000,
            speed_close: 6000,
        });
        assert_eq!(state.motor_speed(Direction::Open), 4000);
        assert_eq!(state.motor_speed(Direction::Close), 6000);
    }
}
