//! Deckhand Hardware Abstraction Layer
//!
//! This crate defines the hardware boundary the deck controller talks
//! through. Chip-specific HALs implement these traits so the controller
//! logic never touches registers directly.
//!
//! Everything here is synchronous and infallible. Waiting for an edge is
//! async and chip-specific, so it lives on the concrete input type; this
//! crate only defines the [`EdgeEvents`] mask those waits report.
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmOutput`] - PWM duty level
//! - [`irq::EdgeEvents`] - Edge/level event mask delivered with pin events

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod irq;
pub mod pwm;

pub use gpio::{InputPin, OutputPin};
pub use irq::EdgeEvents;
pub use pwm::PwmOutput;
