//! GPIO wrappers implementing the deck-hal pin traits
//!
//! Inputs are configured from a [`PinConfig`]: `pull_up` selects the pull
//! resistor (pull-down otherwise) and `inverted` marks the pin active-low.

use deck_core::config::PinConfig;
use deck_hal::{EdgeEvents, InputPin, OutputPin};
use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;

/// Input pin with async edge waiting
pub struct RpInput {
    input: Input<'static>,
    config: PinConfig,
}

impl RpInput {
    pub fn new(pin: Peri<'static, AnyPin>, config: PinConfig) -> Self {
        let pull = if config.pull_up { Pull::Up } else { Pull::Down };
        Self {
            input: Input::new(pin, pull),
            config,
        }
    }

    /// Wait for one of the logical `edges` on this pin
    ///
    /// `edges` is in asserted/deasserted terms. Returns the electrical
    /// mask of the edge that was seen.
    pub async fn wait_for_edge(&mut self, edges: EdgeEvents) -> EdgeEvents {
        let electrical = if self.config.inverted {
            edges.inverted()
        } else {
            edges
        };

        if electrical.contains(EdgeEvents::EDGE_ANY) {
            self.input.wait_for_any_edge().await;
            EdgeEvents::edge_to(self.input.is_high())
        } else if electrical.contains(EdgeEvents::EDGE_RISE) {
            self.input.wait_for_rising_edge().await;
            EdgeEvents::EDGE_RISE
        } else if electrical.contains(EdgeEvents::EDGE_FALL) {
            self.input.wait_for_falling_edge().await;
            EdgeEvents::EDGE_FALL
        } else {
            core::future::pending().await
        }
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}

/// Push-pull output pin
pub struct RpOutput {
    output: Output<'static>,
}

impl RpOutput {
    /// Create an output, initially low
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self {
            output: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}
