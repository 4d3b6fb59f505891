//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in deck-core, written against the deck-hal pin traits:
//!
//! - H-bridge DC motor (two direction lines plus PWM)
//! - Polarity-aware bank of deck inputs
//! - Status and auxiliary indicator LEDs

#![no_std]
#![deny(unsafe_code)]

pub mod indicator;
pub mod input;
pub mod motor;
