//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod deck;
pub mod status;
pub mod tick;

pub use deck::deck_task;
pub use status::status_task;
pub use tick::tick_task;
