//! Deck state machine definition
//!
//! All motor behaviour is a function of the current state and an event.
//! The controller only writes to the motor when the transition table
//! produces a new state.

use super::events::DeckEvent;
use crate::traits::Direction;

/// Deck states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeckState {
    /// Motor stopped, ready for a request
    #[default]
    Idle,
    /// Driving towards the open limit
    Opening,
    /// Driving towards the closed limit
    Closing,
    /// Fault detected; motor stopped until acknowledged
    Fault(ErrorKind),
}

/// Types of errors that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Motor ran for longer than the stall timeout without reaching a limit
    MotorStallTimeout,
}

impl DeckState {
    /// Check if the motor is being driven in this state
    pub fn is_moving(&self) -> bool {
        matches!(self, DeckState::Opening | DeckState::Closing)
    }

    /// Direction of travel, if moving
    pub fn direction(&self) -> Option<Direction> {
        match self {
            DeckState::Opening => Some(Direction::Open),
            DeckState::Closing => Some(Direction::Close),
            _ => None,
        }
    }

    /// Check if this is a fault state
    pub fn is_fault(&self) -> bool {
        matches!(self, DeckState::Fault(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: DeckEvent) -> Self {
        use DeckEvent::*;
        use DeckState::*;

        match (self, event) {
            // Idle transitions
            (Idle, StartOpening) => Opening,
            (Idle, StartClosing) => Closing,
            (Idle, FaultDetected(kind)) => Fault(kind),

            // Opening transitions
            (Opening, Stopped) => Idle,
            (Opening, FaultDetected(kind)) => Fault(kind),

            // Closing transitions
            (Closing, Stopped) => Idle,
            (Closing, FaultDetected(kind)) => Fault(kind),

            // Fault transitions
            (Fault(_), AcknowledgeFault) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(DeckState::default(), DeckState::Idle);
    }

    #[test]
    fn test_open_close_cycle() {
        let opening = DeckState::Idle.transition(DeckEvent::StartOpening);
        assert_eq!(opening, DeckState::Opening);
        assert_eq!(opening.transition(DeckEvent::Stopped), DeckState::Idle);

        let closing = DeckState::Idle.transition(DeckEvent::StartClosing);
        assert_eq!(closing, DeckState::Closing);
        assert_eq!(closing.transition(DeckEvent::Stopped), DeckState::Idle);
    }

    #[test]
    fn test_no_direction_change_while_moving() {
        assert_eq!(
            DeckState::Closing.transition(DeckEvent::StartOpening),
            DeckState::Closing
        );
        assert_eq!(
            DeckState::Opening.transition(DeckEvent::StartClosing),
            DeckState::Opening
        );
    }

    #[test]
    fn test_fault_from_any_state() {
        let states = [DeckState::Idle, DeckState::Opening, DeckState::Closing];

        for state in states {
            let next = state.transition(DeckEvent::FaultDetected(ErrorKind::MotorStallTimeout));
            assert_eq!(next, DeckState::Fault(ErrorKind::MotorStallTimeout));
        }
    }

    #[test]
    fn test_fault_latches() {
        let fault = DeckState::Fault(ErrorKind::MotorStallTimeout);

        assert_eq!(fault.transition(DeckEvent::StartOpening), fault);
        assert_eq!(fault.transition(DeckEvent::StartClosing), fault);
        assert_eq!(fault.transition(DeckEvent::Stopped), fault);
        assert_eq!(fault.transition(DeckEvent::AcknowledgeFault), DeckState::Idle);
    }

    #[test]
    fn test_acknowledge_outside_fault_is_noop() {
        assert_eq!(
            DeckState::Opening.transition(DeckEvent::AcknowledgeFault),
            DeckState::Opening
        );
    }

    #[test]
    fn test_direction() {
        assert_eq!(DeckState::Opening.direction(), Some(Direction::Open));
        assert_eq!(DeckState::Closing.direction(), Some(Direction::Close));
        assert_eq!(DeckState::Idle.direction(), None);
        assert!(DeckState::Closing.is_moving());
        assert!(!DeckState::Fault(ErrorKind::MotorStallTimeout).is_moving());
    }
}
