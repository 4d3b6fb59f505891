//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use deck_core::state::ErrorKind;

/// Latched fault, published by the deck task whenever it changes
///
/// `None` once the fault has been acknowledged.
pub static FAULT_STATE: Signal<CriticalSectionRawMutex, Option<ErrorKind>> = Signal::new();
