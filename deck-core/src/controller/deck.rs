//! Deck controller state machine
//!
//! Owns the motor driver, the current [`DeckState`] and the stall
//! watchdog. Requests never fail: each returns an [`Outcome`] the caller
//! can log. Nothing is written to the motor unless the request is legal.

use crate::config::SafetyConfig;
use crate::safety::{SafetyStatus, StallWatchdog};
use crate::state::{DeckEvent, DeckState, ErrorKind, RuntimeState};
use crate::traits::{DeckInputs, Direction, InputId, MotorDriver};

/// Why a request was not carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// Limit switch for the requested direction is already asserted
    AtLimit,
    /// Another actuation is in progress
    MotorRunning,
    /// Controller is latched in a fault
    Faulted,
}

/// Result of a controller request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Motor claimed and driving
    Started(Direction),
    /// Motor stopped
    Stopped,
    /// Request refused, no hardware writes
    Rejected(RejectReason),
    /// Nothing to do
    Ignored,
    /// Fault acknowledged, back to idle
    FaultCleared,
}

impl Outcome {
    /// Check if this outcome touched the motor
    pub fn actuated(&self) -> bool {
        matches!(self, Outcome::Started(_) | Outcome::Stopped)
    }
}

/// Deck controller
pub struct DeckController<'a, M: MotorDriver> {
    motor: M,
    runtime: &'a RuntimeState,
    state: DeckState,
    watchdog: StallWatchdog,
}

impl<'a, M: MotorDriver> DeckController<'a, M> {
    /// Create a controller and put the motor in a known stopped state
    pub fn new(mut motor: M, runtime: &'a RuntimeState, safety: &SafetyConfig) -> Self {
        motor.stop();
        runtime.release_motor();

        Self {
            motor,
            runtime,
            state: DeckState::Idle,
            watchdog: StallWatchdog::from_config(safety),
        }
    }

    /// Drive towards the open limit
    pub fn open<I: DeckInputs>(&mut self, inputs: &I) -> Outcome {
        self.request(inputs, Direction::Open)
    }

    /// Drive towards the closed limit
    pub fn close<I: DeckInputs>(&mut self, inputs: &I) -> Outcome {
        self.request(inputs, Direction::Close)
    }

    fn request<I: DeckInputs>(&mut self, inputs: &I, direction: Direction) -> Outcome {
        if self.state.is_fault() {
            return Outcome::Rejected(RejectReason::Faulted);
        }
        if self.runtime.is_motor_running() {
            return Outcome::Rejected(RejectReason::MotorRunning);
        }
        if inputs.is_asserted(InputId::limit_for(direction)) {
            return Outcome::Rejected(RejectReason::AtLimit);
        }
        if !self.runtime.try_claim_motor() {
            return Outcome::Rejected(RejectReason::MotorRunning);
        }

        let duty = self.runtime.motor_speed(direction);
        self.motor.drive(direction, duty);
        self.watchdog.arm();
        self.state = self.state.transition(DeckEvent::started(direction));

        Outcome::Started(direction)
    }

    /// Stop the motor unconditionally
    ///
    /// Always writes both direction lines low and duty zero, even if the
    /// motor was already stopped.
    pub fn stop(&mut self) -> Outcome {
        self.halt();
        self.state = self.state.transition(DeckEvent::Stopped);
        Outcome::Stopped
    }

    fn halt(&mut self) {
        self.motor.stop();
        self.runtime.release_motor();
        self.watchdog.disarm();
    }

    /// Stop if the limit for the current direction is already asserted
    ///
    /// Covers a limit edge that arrived while another event was being
    /// handled. Ignored when stationary.
    pub fn check_limits<I: DeckInputs>(&mut self, inputs: &I) -> Outcome {
        match self.state.direction() {
            Some(direction) if inputs.is_asserted(InputId::limit_for(direction)) => self.stop(),
            _ => Outcome::Ignored,
        }
    }

    /// Apply the linked-power policy
    ///
    /// Without linked power the deck closes regardless of manual control.
    /// With linked power and manual control disengaged it opens. Calling
    /// this again in the commanded state is rejected without writes.
    pub fn run<I: DeckInputs>(&mut self, inputs: &I) -> Outcome {
        if self.state.is_fault() {
            return Outcome::Rejected(RejectReason::Faulted);
        }

        if !inputs.is_asserted(InputId::LinkedPower) {
            return self.close(inputs);
        }
        if !self.runtime.is_manual_control() {
            return self.open(inputs);
        }

        Outcome::Ignored
    }

    /// Advance the stall watchdog
    ///
    /// On expiry the motor is stopped and the controller latches
    /// `Fault(kind)`. Returns the fault that was raised, if any.
    pub fn tick(&mut self, delta_ms: u32) -> Option<ErrorKind> {
        self.watchdog.update_time(delta_ms);

        match self.watchdog.check() {
            SafetyStatus::Ok => None,
            SafetyStatus::Fault(kind) => {
                self.halt();
                self.state = self.state.transition(DeckEvent::FaultDetected(kind));
                Some(kind)
            }
        }
    }

    /// Clear a latched fault
    pub fn acknowledge_fault(&mut self) -> Outcome {
        if !self.state.is_fault() {
            return Outcome::Ignored;
        }

        self.state = self.state.transition(DeckEvent::AcknowledgeFault);
        Outcome::FaultCleared
    }

    /// Engage manual control; returns `true` if the flag changed
    pub fn enable_manual_control(&self) -> bool {
        self.runtime.enable_manual_control()
    }

    /// Disengage manual control; returns `true` if the flag changed
    pub fn disable_manual_control(&self) -> bool {
        self.runtime.disable_manual_control()
    }

    pub fn is_manual_control(&self) -> bool {
        self.runtime.is_manual_control()
    }

    pub fn is_motor_running(&self) -> bool {
        self.runtime.is_motor_running()
    }

    pub fn state(&self) -> DeckState {
        self.state
    }

    pub fn watchdog(&self) -> &StallWatchdog {
        &self.watchdog
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn motor_mut(&mut self) -> &mut M {
        &mut self.motor
    }
}
