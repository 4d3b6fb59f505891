//! Motor driver trait
//!
//! The deck uses a single DC motor behind an H-bridge: two direction lines
//! and one PWM channel.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of deck travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Towards the open limit
    Open,
    /// Towards the closed limit
    Close,
}

/// Bidirectional DC motor driver
///
/// Implementations own the invariant that both direction lines are never
/// asserted at the same time. Hardware writes are infallible at this layer.
pub trait MotorDriver {
    /// Drive in `direction` at compare level `duty`
    ///
    /// `duty` is not range-checked here; it was validated against the PWM
    /// wrap value when the configuration was loaded.
    fn drive(&mut self, direction: Direction, duty: u16);

    /// Both direction lines low, duty zero
    fn stop(&mut self);
}
