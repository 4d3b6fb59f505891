//! RP2040-specific HAL for the deck actuator firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `deck-hal` traits, plus RP2040-specific functionality:
//!
//! - Dynamic pin allocation for config-driven setup
//! - Input/output wrappers with edge waiting
//! - PWM slice wrapper with validated clock divider

#![no_std]

pub mod gpio;
pub mod pins;
pub mod pwm;

pub use gpio::{RpInput, RpOutput};
pub use pins::{PinBank, PinError, RemainingPeripherals};
pub use pwm::RpPwm;
