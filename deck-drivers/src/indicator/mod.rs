//! Indicator LED implementations

pub mod status;

pub use status::StatusIndicator;
