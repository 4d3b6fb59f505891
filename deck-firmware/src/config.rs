//! Configuration loading
//!
//! Parses the embedded `deck.toml` and validates it against the actual
//! system clock. Falls back to the built-in defaults if either step fails.

use defmt::*;

use deck_core::config::{parse_config, DeckConfig};
use deck_hal_rp2040::pins::MOTOR_PWM_PIN;

/// Embedded configuration (compiled into firmware)
/// Edit deck.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../deck.toml");

/// Load and validate the embedded configuration
pub fn load_config(sys_clk_hz: u32) -> DeckConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse deck.toml: {}, using defaults", e);
            return DeckConfig::default();
        }
    };

    if let Err(e) = config.validate(sys_clk_hz) {
        error!("Invalid deck.toml: {}, using defaults", e);
        return DeckConfig::default();
    }

    if config.pins.motor_pwm.pin != MOTOR_PWM_PIN {
        warn!(
            "motor_pwm must be gpio{} on this board (got gpio{}), using defaults",
            MOTOR_PWM_PIN, config.pins.motor_pwm.pin
        );
        return DeckConfig::default();
    }

    info!("Configuration loaded from deck.toml");
    config
}
