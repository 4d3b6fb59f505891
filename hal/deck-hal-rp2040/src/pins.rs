//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so pin numbers
//! come from `deck.toml` rather than being hardcoded. The motor PWM pin is
//! fixed by the board and handed out separately with its PWM slice.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_10, PWM_SLICE5};
use embassy_rp::{Peri, Peripherals};

use deck_core::config::GPIO_COUNT;

/// GPIO wired to the motor driver's PWM input (slice 5, channel A)
pub const MOTOR_PWM_PIN: u8 = 10;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
    /// Pin reserved for special function
    Reserved(u8),
}

/// Pin bank that holds all free GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Split the peripherals into a pin bank and the rest
    ///
    /// Takes ownership of all GPIO pins. After this call, pins must be
    /// obtained through [`PinBank::take`].
    pub fn from_peripherals(p: Peripherals) -> (Self, RemainingPeripherals) {
        let bank = Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                // PIN_10 is the motor PWM output
                None,
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };
        let remaining = RemainingPeripherals {
            pwm_slice5: p.PWM_SLICE5,
            motor_pwm_pin: p.PIN_10,
        };
        (bank, remaining)
    }

    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin is reserved by the board
    /// - Pin was already taken
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin(pin_num));
        }
        if pin_num == MOTOR_PWM_PIN {
            return Err(PinError::Reserved(pin_num));
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken(pin_num))
    }
}

/// Non-GPIO peripherals that remain after creating the PinBank
pub struct RemainingPeripherals {
    pub pwm_slice5: Peri<'static, PWM_SLICE5>,
    pub motor_pwm_pin: Peri<'static, PIN_10>,
}
