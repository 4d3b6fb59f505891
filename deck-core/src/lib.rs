//! Board-agnostic core logic for the deck actuator firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Motor and input traits the controller drives
//! - Runtime state shared between the edge path and foreground tasks
//! - Deck state machine (idle / opening / closing / fault)
//! - Deck controller and the data-driven edge dispatcher
//! - Stall watchdog
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod safety;
pub mod state;
pub mod traits;
