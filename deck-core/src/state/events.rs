//! Events that trigger state transitions

use super::machine::ErrorKind;
use crate::traits::Direction;

/// Events that can trigger deck state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeckEvent {
    /// Motor claimed and driving towards the open limit
    StartOpening,
    /// Motor claimed and driving towards the closed limit
    StartClosing,
    /// Motor stopped (limit reached or explicit stop)
    Stopped,

    // Safety events
    /// Error detected by the safety subsystem
    FaultDetected(ErrorKind),
    /// Operator acknowledged the fault
    AcknowledgeFault,
}

impl DeckEvent {
    /// Event for a run that has just started in `direction`
    pub const fn started(direction: Direction) -> Self {
        match direction {
            Direction::Open => DeckEvent::StartOpening,
            Direction::Close => DeckEvent::StartClosing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_event() {
        assert_eq!(DeckEvent::started(Direction::Open), DeckEvent::StartOpening);
        assert_eq!(DeckEvent::started(Direction::Close), DeckEvent::StartClosing);
    }
}
