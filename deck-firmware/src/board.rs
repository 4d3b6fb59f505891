//! Board bring-up
//!
//! Takes the configured pins from the pin bank and builds the motor,
//! input bank and indicator drivers. The motor is built first so the
//! direction lines are driven low as early as possible.

use deck_core::config::{ConfigError, DeckConfig, PinConfig};
use deck_drivers::indicator::StatusIndicator;
use deck_drivers::input::DeckSignals;
use deck_drivers::motor::HBridgeMotor;
use deck_hal_rp2040::{PinBank, PinError, RemainingPeripherals, RpInput, RpOutput, RpPwm};

/// H-bridge motor on RP2040 pins
pub type DeckMotor = HBridgeMotor<RpOutput, RpOutput, RpPwm>;

/// Status and auxiliary LEDs
pub type DeckIndicator = StatusIndicator<RpOutput, RpOutput>;

/// Error during board bring-up
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    Pin(PinError),
    Pwm(ConfigError),
}

impl From<PinError> for BoardError {
    fn from(e: PinError) -> Self {
        BoardError::Pin(e)
    }
}

impl From<ConfigError> for BoardError {
    fn from(e: ConfigError) -> Self {
        BoardError::Pwm(e)
    }
}

/// Drivers for everything wired to the deck
pub struct Board {
    pub motor: DeckMotor,
    pub signals: DeckSignals<RpInput>,
    pub indicator: DeckIndicator,
}

impl Board {
    pub fn init(
        bank: &mut PinBank,
        rest: RemainingPeripherals,
        config: &DeckConfig,
        sys_clk_hz: u32,
    ) -> Result<Self, BoardError> {
        let pins = &config.pins;

        let pwm = RpPwm::new(rest.pwm_slice5, rest.motor_pwm_pin, &config.pwm, sys_clk_hz)?;
        let motor = HBridgeMotor::new(
            output(bank, pins.motor_in1)?,
            output(bank, pins.motor_in2)?,
            pwm,
        );

        let signals = DeckSignals::new(
            input(bank, pins.limited_close)?,
            input(bank, pins.limited_open)?,
            input(bank, pins.trigger_close)?,
            input(bank, pins.trigger_open)?,
            input(bank, pins.linked_power)?,
            pins,
        );

        let indicator = StatusIndicator::new(
            output(bank, pins.status_led)?,
            output(bank, pins.bling_led)?,
        );

        Ok(Self {
            motor,
            signals,
            indicator,
        })
    }
}

fn input(bank: &mut PinBank, config: PinConfig) -> Result<RpInput, PinError> {
    Ok(RpInput::new(bank.take(config.pin)?, config))
}

fn output(bank: &mut PinBank, config: PinConfig) -> Result<RpOutput, PinError> {
    Ok(RpOutput::new(bank.take(config.pin)?))
}
