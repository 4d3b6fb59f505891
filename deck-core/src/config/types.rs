//! Configuration type definitions
//!
//! These types represent the complete deck configuration: pin assignment,
//! motor duty levels, PWM timing, supervision and safety. `Default`
//! reproduces the reference wiring of the keyboard deck board.

use heapless::FnvIndexSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Default system clock of the RP2040 (Hz)
pub const DEFAULT_SYS_CLK_HZ: u32 = 125_000_000;

/// Largest usable PWM wrap value (wrap + 1 must fit in a duty level)
pub const MAX_WRAP: u16 = u16::MAX - 1;

/// Smallest PWM clock divider in 1/16 units (1.0)
pub const MIN_DIVIDER_X16: u32 = 16;

/// Largest PWM clock divider in 1/16 units (255 + 15/16)
pub const MAX_DIVIDER_X16: u32 = 4095;

/// Configuration errors found during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Same pin assigned to two functions
    DuplicatePin(u8),
    /// PWM wrap of zero gives no duty resolution
    ZeroWrap,
    /// PWM wrap leaves no room for a 100% duty level
    WrapTooLarge,
    /// PWM frequency of zero
    ZeroFrequency,
    /// Frequency needs a clock divider outside 1.0..=255.9375
    FrequencyOutOfRange,
    /// Duty level above wrap + 1
    DutyOutOfRange(u16),
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up (pull-down otherwise, for inputs)
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create an active-low pin with pull-up enabled
    pub const fn active_low_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }

    /// Whether a sampled level means "asserted" for this pin
    pub const fn is_asserted(&self, high: bool) -> bool {
        high != self.inverted
    }

    /// Parse a pin string from config
    ///
    /// Supports formats:
    /// - "gpio11" -> pin 11
    /// - "!gpio12" -> pin 12, inverted (active-low)
    /// - "^gpio4" -> pin 4 with pull-up
    /// - "!^gpio17" / "^!gpio17" -> both
    pub fn parse(s: &str) -> Option<Self> {
        let mut s = s.trim();
        let mut config = PinConfig::default();

        loop {
            if let Some(rest) = s.strip_prefix('!') {
                config.inverted = true;
                s = rest;
            } else if let Some(rest) = s.strip_prefix('^') {
                config.pull_up = true;
                s = rest;
            } else {
                break;
            }
        }

        let num = s.strip_prefix("gpio")?;
        let pin: u8 = num.parse().ok()?;

        if pin >= GPIO_COUNT {
            return None;
        }

        config.pin = pin;
        Some(config)
    }
}

/// Pin assignment for every signal the deck uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMap {
    /// Closed end-of-travel switch
    pub limited_close: PinConfig,
    /// Open end-of-travel switch
    pub limited_open: PinConfig,
    /// Linked power sense
    pub linked_power: PinConfig,
    /// Close request input
    pub trigger_close: PinConfig,
    /// Open request input
    pub trigger_open: PinConfig,
    /// Status LED (on while the motor runs)
    pub status_led: PinConfig,
    /// Auxiliary indicator LED
    pub bling_led: PinConfig,
    /// Motor PWM output
    pub motor_pwm: PinConfig,
    /// H-bridge input 1 (high when closing)
    pub motor_in1: PinConfig,
    /// H-bridge input 2 (high when opening)
    pub motor_in2: PinConfig,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            limited_close: PinConfig::new(15),
            limited_open: PinConfig::new(14),
            linked_power: PinConfig::new(18),
            trigger_close: PinConfig::active_low_pullup(17),
            trigger_open: PinConfig::active_low_pullup(16),
            status_led: PinConfig::new(25),
            bling_led: PinConfig::new(1),
            motor_pwm: PinConfig::new(10),
            motor_in1: PinConfig::new(12),
            motor_in2: PinConfig::new(13),
        }
    }
}

impl PinMap {
    /// All assigned pins with their config key
    pub fn entries(&self) -> [(&'static str, PinConfig); 10] {
        [
            ("limited_close", self.limited_close),
            ("limited_open", self.limited_open),
            ("linked_power", self.linked_power),
            ("trigger_close", self.trigger_close),
            ("trigger_open", self.trigger_open),
            ("status_led", self.status_led),
            ("bling_led", self.bling_led),
            ("motor_pwm", self.motor_pwm),
            ("motor_in1", self.motor_in1),
            ("motor_in2", self.motor_in2),
        ]
    }

    /// Check that every pin exists and no pin is assigned twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen: FnvIndexSet<u8, 16> = FnvIndexSet::new();

        for (_, cfg) in self.entries() {
            if cfg.pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin(cfg.pin));
            }
            match seen.insert(cfg.pin) {
                Ok(true) => {}
                _ => return Err(ConfigError::DuplicatePin(cfg.pin)),
            }
        }

        Ok(())
    }
}

/// Duty levels for each direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Compare level while opening
    pub speed_open: u16,
    /// Compare level while closing
    pub speed_close: u16,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            speed_open: 10_000,
            speed_close: 10_000,
        }
    }
}

/// PWM timing
///
/// The duty resolution is `wrap + 1` steps. The switching frequency is
/// `sys_clk / (divider * (wrap + 1))`, and the divider must stay inside the
/// hardware range, so not every frequency/wrap pair is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PwmSettings {
    /// Target switching frequency (Hz)
    pub frequency_hz: u32,
    /// Counter wrap (TOP) value
    pub wrap: u16,
}

impl Default for PwmSettings {
    fn default() -> Self {
        Self {
            frequency_hz: 500,
            wrap: 9_999,
        }
    }
}

impl PwmSettings {
    /// Duty level that holds the output permanently on
    pub const fn max_duty(&self) -> u16 {
        self.wrap.saturating_add(1)
    }

    /// Check wrap bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wrap == 0 {
            return Err(ConfigError::ZeroWrap);
        }
        if self.wrap > MAX_WRAP {
            return Err(ConfigError::WrapTooLarge);
        }
        if self.frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        Ok(())
    }

    /// Clock divider in 1/16 units (8.4 fixed point), rounded to nearest
    pub fn divider_x16(&self, sys_clk_hz: u32) -> Result<u16, ConfigError> {
        self.validate()?;

        let denom = self.frequency_hz as u64 * (self.wrap as u64 + 1);
        let div = (sys_clk_hz as u64 * 16 + denom / 2) / denom;

        if div < MIN_DIVIDER_X16 as u64 || div > MAX_DIVIDER_X16 as u64 {
            return Err(ConfigError::FrequencyOutOfRange);
        }

        Ok(div as u16)
    }

    /// Frequency actually produced by a divider (Hz)
    pub fn actual_frequency_hz(&self, sys_clk_hz: u32, divider_x16: u16) -> u32 {
        let denom = divider_x16 as u64 * (self.wrap as u64 + 1);
        if denom == 0 {
            return 0;
        }
        (sys_clk_hz as u64 * 16 / denom) as u32
    }
}

/// Supervisory policy scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SupervisorConfig {
    /// Run the linked-power policy at boot and on linked-power edges
    pub enabled: bool,
    /// Period between extra policy runs from the tick path (ms, 0 = none)
    ///
    /// A periodic run re-asserts the policy over the triggers, so a close
    /// requested by button while linked power is present is reopened.
    pub interval_ms: u32,
}

impl SupervisorConfig {
    /// Check if the policy also runs on a timer
    pub const fn is_periodic(&self) -> bool {
        self.enabled && self.interval_ms > 0
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 0,
        }
    }
}

/// Safety limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafetyConfig {
    /// Longest a run may take before the limit switch is presumed failed
    /// (ms, 0 = no watchdog)
    pub stall_timeout_ms: u32,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            stall_timeout_ms: 15_000,
        }
    }
}

/// Complete deck configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeckConfig {
    pub pins: PinMap,
    pub motor: MotorConfig,
    pub pwm: PwmSettings,
    pub supervisor: SupervisorConfig,
    pub safety: SafetyConfig,
}

impl DeckConfig {
    /// Validate the whole configuration against a system clock
    pub fn validate(&self, sys_clk_hz: u32) -> Result<(), ConfigError> {
        self.pins.validate()?;
        self.pwm.divider_x16(sys_clk_hz)?;

        let max = self.pwm.max_duty();
        for level in [self.motor.speed_open, self.motor.speed_close] {
            if level > max {
                return Err(ConfigError::DutyOutOfRange(level));
            }
        }

        Ok(())
    }
}
