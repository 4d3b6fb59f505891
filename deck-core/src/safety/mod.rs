//! Safety monitoring
//!
//! Detects fault conditions and triggers the fault state.

pub mod watchdog;

pub use watchdog::{SafetyStatus, StallWatchdog};
