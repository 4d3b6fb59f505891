//! Input implementations

pub mod signals;

pub use signals::DeckSignals;
