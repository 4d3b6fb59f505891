//! Deck controller
//!
//! Decides whether an open/close/stop request is legal and performs it,
//! plus the edge dispatcher and the supervision schedule that feed it.

pub mod deck;
pub mod dispatch;
pub mod supervisor;

pub use deck::{DeckController, Outcome, RejectReason};
pub use dispatch::{Action, Binding, Dispatcher, Guard, Requirement};
pub use supervisor::Supervisor;
