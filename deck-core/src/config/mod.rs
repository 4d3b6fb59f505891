//! Configuration types
//!
//! Board-agnostic configuration structures plus the parser for the
//! embedded `deck.toml`.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
