//! Deck state machine and shared runtime state
//!
//! The state machine is explicit, finite, and deterministic. Runtime state
//! holds the flags shared between the edge path and the foreground tasks.

pub mod events;
pub mod machine;
pub mod runtime;

pub use events::DeckEvent;
pub use machine::{DeckState, ErrorKind};
pub use runtime::RuntimeState;
