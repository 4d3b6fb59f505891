//! Deck input bank
//!
//! Holds the five monitored input pins together with their polarity so
//! the controller can ask "is this input asserted" without knowing how
//! each switch is wired.

use deck_core::config::{PinConfig, PinMap};
use deck_core::traits::{DeckInputs, InputId};
use deck_hal::InputPin;

/// Monitored deck inputs, indexed by [`InputId`]
pub struct DeckSignals<P> {
    pins: [P; 5],
    configs: [PinConfig; 5],
}

impl<P: InputPin> DeckSignals<P> {
    /// Create the bank from pins already configured for input
    ///
    /// Polarity is taken from `map`.
    pub fn new(
        limited_close: P,
        limited_open: P,
        trigger_close: P,
        trigger_open: P,
        linked_power: P,
        map: &PinMap,
    ) -> Self {
        Self {
            pins: [limited_close, limited_open, trigger_close, trigger_open, linked_power],
            configs: [
                map.limited_close,
                map.limited_open,
                map.trigger_close,
                map.trigger_open,
                map.linked_power,
            ],
        }
    }

    /// Pin configuration for an input
    pub fn config(&self, input: InputId) -> PinConfig {
        self.configs[input as usize]
    }

    /// All pins at once, in [`InputId::ALL`] order
    ///
    /// Lets the edge loop wait on every pin concurrently.
    pub fn pins_mut(&mut self) -> &mut [P; 5] {
        &mut self.pins
    }

    /// Raw electrical level of an input
    pub fn is_high(&self, input: InputId) -> bool {
        self.pins[input as usize].is_high()
    }
}

impl<P: InputPin> DeckInputs for DeckSignals<P> {
    fn is_asserted(&self, input: InputId) -> bool {
        self.config(input).is_asserted(self.is_high(input))
    }
}
