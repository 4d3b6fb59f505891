//! Deck input sampling
//!
//! The controller only asks whether an input is asserted; polarity and
//! pull configuration belong to the implementation.

use super::motor::Direction;

/// Identity of a monitored deck input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputId {
    /// Closed end-of-travel switch
    LimitedClose,
    /// Open end-of-travel switch
    LimitedOpen,
    /// Close request button
    TriggerClose,
    /// Open request button
    TriggerOpen,
    /// Host power sense
    LinkedPower,
}

impl InputId {
    /// All inputs, in binding order
    pub const ALL: [InputId; 5] = [
        InputId::LimitedClose,
        InputId::LimitedOpen,
        InputId::TriggerClose,
        InputId::TriggerOpen,
        InputId::LinkedPower,
    ];

    /// Limit switch that ends travel in `direction`
    pub const fn limit_for(direction: Direction) -> Self {
        match direction {
            Direction::Open => InputId::LimitedOpen,
            Direction::Close => InputId::LimitedClose,
        }
    }

    /// Configuration key naming this input
    pub const fn name(&self) -> &'static str {
        match self {
            InputId::LimitedClose => "limited_close",
            InputId::LimitedOpen => "limited_open",
            InputId::TriggerClose => "trigger_close",
            InputId::TriggerOpen => "trigger_open",
            InputId::LinkedPower => "linked_power",
        }
    }
}

/// Sampled deck inputs
///
/// Every call is a fresh hardware sample; implementations keep no state.
pub trait DeckInputs {
    /// Check if `input` is in its active state
    fn is_asserted(&self, input: InputId) -> bool;
}
