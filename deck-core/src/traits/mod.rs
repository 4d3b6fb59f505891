//! Hardware abstraction traits
//!
//! These traits define the interface between the deck controller and
//! the drivers that wrap the actual pins.

pub mod inputs;
pub mod motor;

pub use inputs::{DeckInputs, InputId};
pub use motor::{Direction, MotorDriver};
