//! Edge dispatcher
//!
//! The single entry point for pin events. A table of bindings, built once
//! from the pin map, decides which controller request an edge turns into.
//!
//! | input          | edges        | requires | guard         | action    |
//! |----------------|--------------|----------|---------------|-----------|
//! | limited_close  | rise         | asserted | motor running | stop      |
//! | limited_open   | rise         | asserted | motor running | stop      |
//! | trigger_close  | rise         | asserted | motor idle    | close     |
//! | trigger_open   | rise         | asserted | motor idle    | open      |
//! | linked_power   | rise or fall | any      | none          | supervise |
//!
//! Edges in the table are logical: "rise" means the input became asserted.
//! Masks from active-low pins are inverted before matching.

use deck_hal::EdgeEvents;
use heapless::Vec;

use super::deck::{DeckController, Outcome, RejectReason};
use crate::config::{DeckConfig, PinConfig, PinMap};
use crate::traits::{DeckInputs, InputId, MotorDriver};

/// Maximum number of bindings
pub const MAX_BINDINGS: usize = 5;

/// Level the input must be at when the edge is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Requirement {
    /// Input must still be asserted
    Asserted,
    /// Either level
    Any,
}

/// Motor condition a binding is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Guard {
    /// Always handled
    None,
    /// Only while no actuation is in progress; otherwise rejected
    MotorIdle,
    /// Only while an actuation is in progress; otherwise ignored
    MotorRunning,
}

/// Controller request a binding performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Stop,
    Open,
    Close,
    /// Run the linked-power policy
    Supervise,
}

impl Action {
    /// Check if this action is an operator request
    pub fn is_request(&self) -> bool {
        matches!(self, Action::Open | Action::Close)
    }
}

/// One row of the dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Binding {
    /// Pin and polarity
    pub pin: PinConfig,
    pub input: InputId,
    /// Logical edges that fire this binding
    pub edges: EdgeEvents,
    pub requires: Requirement,
    pub guard: Guard,
    pub action: Action,
}

impl Binding {
    /// Convert an electrical event mask into asserted/deasserted terms
    pub fn logical_events(&self, events: EdgeEvents) -> EdgeEvents {
        if self.pin.inverted {
            events.inverted()
        } else {
            events
        }
    }
}

/// Data-driven pin event dispatcher
#[derive(Debug, Clone)]
pub struct Dispatcher {
    bindings: Vec<Binding, MAX_BINDINGS>,
}

impl Dispatcher {
    /// Build the full binding table for a pin map
    pub fn from_pins(pins: &PinMap) -> Self {
        Self::build(pins, true)
    }

    /// Build the binding table for a configuration
    ///
    /// The linked-power binding is left out when supervision is disabled.
    pub fn from_config(config: &DeckConfig) -> Self {
        Self::build(&config.pins, config.supervisor.enabled)
    }

    fn build(pins: &PinMap, supervise: bool) -> Self {
        let limit = |pin, input| Binding {
            pin,
            input,
            edges: EdgeEvents::EDGE_RISE,
            requires: Requirement::Asserted,
            guard: Guard::MotorRunning,
            action: Action::Stop,
        };
        let trigger = |pin, input, action| Binding {
            pin,
            input,
            edges: EdgeEvents::EDGE_RISE,
            requires: Requirement::Asserted,
            guard: Guard::MotorIdle,
            action,
        };

        let power = supervise.then_some(Binding {
            pin: pins.linked_power,
            input: InputId::LinkedPower,
            edges: EdgeEvents::EDGE_ANY,
            requires: Requirement::Any,
            guard: Guard::None,
            action: Action::Supervise,
        });

        let bindings = [
            limit(pins.limited_close, InputId::LimitedClose),
            limit(pins.limited_open, InputId::LimitedOpen),
            trigger(pins.trigger_close, InputId::TriggerClose, Action::Close),
            trigger(pins.trigger_open, InputId::TriggerOpen, Action::Open),
        ]
        .into_iter()
        .chain(power)
        .collect();

        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Find the binding for a GPIO number
    pub fn binding_for(&self, pin: u8) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.pin.pin == pin)
    }

    /// Handle one pin event to completion
    ///
    /// `events` is the electrical mask as reported by the hardware.
    /// Unknown pins, edges outside the binding and level mismatches are
    /// ignored without touching the motor.
    pub fn dispatch<M: MotorDriver, I: DeckInputs>(
        &self,
        deck: &mut DeckController<'_, M>,
        inputs: &I,
        pin: u8,
        events: EdgeEvents,
    ) -> Outcome {
        let Some(binding) = self.binding_for(pin) else {
            return Outcome::Ignored;
        };

        if !binding.logical_events(events).intersects(binding.edges) {
            return Outcome::Ignored;
        }

        if binding.requires == Requirement::Asserted && !inputs.is_asserted(binding.input) {
            return Outcome::Ignored;
        }

        // A press while faulted only acknowledges
        if binding.action.is_request() && deck.state().is_fault() {
            return deck.acknowledge_fault();
        }

        match binding.guard {
            Guard::MotorIdle if deck.is_motor_running() => {
                return Outcome::Rejected(RejectReason::MotorRunning);
            }
            Guard::MotorRunning if !deck.is_motor_running() => {
                return Outcome::Ignored;
            }
            _ => {}
        }

        match binding.action {
            Action::Stop => deck.stop(),
            Action::Open => deck.open(inputs),
            Action::Close => deck.close(inputs),
            Action::Supervise => deck.run(inputs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SafetyConfig;
    use crate::controller::Supervisor;
    use crate::state::{DeckState, ErrorKind, RuntimeState};
    use crate::traits::Direction;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Drive(Direction, u16),
        Stop,
    }

    #[derive(Default)]
    struct RecordingMotor {
        calls: Vec<Call, 32>,
    }

    impl MotorDriver for RecordingMotor {
        fn drive(&mut self, direction: Direction, duty: u16) {
            self.calls.push(Call::Drive(direction, duty)).unwrap();
        }

        fn stop(&mut self) {
            self.calls.push(Call::Stop).unwrap();
        }
    }

    /// Logical input levels indexed by `InputId`
    #[derive(Default, Clone, Copy)]
    struct Inputs([bool; 5]);

    impl Inputs {
        fn set(&mut self, input: InputId, asserted: bool) {
            self.0[input as usize] = asserted;
        }
    }

    impl DeckInputs for Inputs {
        fn is_asserted(&self, input: InputId) -> bool {
            self.0[input as usize]
        }
    }

    const LIMITED_CLOSE: u8 = 15;
    const LIMITED_OPEN: u8 = 14;
    const LINKED_POWER: u8 = 18;
    const TRIGGER_CLOSE: u8 = 17;
    const TRIGGER_OPEN: u8 = 16;

    const RISE: EdgeEvents = EdgeEvents::EDGE_RISE;
    const FALL: EdgeEvents = EdgeEvents::EDGE_FALL;

    fn setup(runtime: &RuntimeState) -> (Dispatcher, DeckController<'_, RecordingMotor>) {
        let dispatcher = Dispatcher::from_pins(&PinMap::default());
        let mut deck = DeckController::new(
            RecordingMotor::default(),
            runtime,
            &SafetyConfig {
                stall_timeout_ms: 1000,
            },
        );
        deck.motor_mut().calls.clear();
        (dispatcher, deck)
    }

    #[test]
    fn test_table_from_default_pins() {
        let dispatcher = Dispatcher::from_pins(&PinMap::default());
        assert_eq!(dispatcher.bindings().len(), 5);

        let power = dispatcher.binding_for(LINKED_POWER).unwrap();
        assert_eq!(power.action, Action::Supervise);
        assert_eq!(power.edges, EdgeEvents::EDGE_ANY);

        let trigger = dispatcher.binding_for(TRIGGER_OPEN).unwrap();
        assert_eq!(trigger.guard, Guard::MotorIdle);
        assert!(trigger.pin.inverted);

        assert!(dispatcher.binding_for(25).is_none());
    }

    #[test]
    fn test_supervision_disabled_drops_power_binding() {
        let mut config = DeckConfig::default();
        config.supervisor.enabled = false;

        let dispatcher = Dispatcher::from_config(&config);
        assert_eq!(dispatcher.bindings().len(), 4);
        assert!(dispatcher.binding_for(LINKED_POWER).is_none());
    }

    #[test]
    fn test_trigger_press_opens() {
        let runtime = RuntimeState::default();
        let (dispatcher, mut deck) = setup(&runtime);
        let mut inputs = Inputs::default();
        inputs.set(InputId::TriggerOpen, true);

        // Active-low button: a press is an electrical falling edge
        let outcome = dispatcher.dispatch(&mut deck, &inputs, TRIGGER_OPEN, FALL);
        assert_eq!(outcome, Outcome::Started(Direction::Open));
        assert_eq!(deck.state(), DeckState::Opening);
    }

    #[test]
    fn test_trigger_release_ignored() {
        let runtime = RuntimeState::default();
        let (dispatcher, mut deck) = setup(&runtime);

        let outcome = dispatcher.dispatch(&mut deck, &Inputs::default(), TRIGGER_OPEN, RISE);
        assert_eq!(outcome, Outcome::Ignored);
        assert!(deck.motor().calls.is_empty());
    }

    #[test]
    fn test_trigger_while_running_rejected() {
        let runtime = RuntimeState::default();
        let (dispatcher, mut deck) = setup(&runtime);
        let mut inputs = Inputs::default();
        inputs.set(InputId::TriggerClose, true);
        inputs.set(InputId::TriggerOpen, true);

        dispatcher.dispatch(&mut deck, &inputs, TRIGGER_CLOSE, FALL);
        let outcome = dispatcher.dispatch(&mut deck, &inputs, TRIGGER_OPEN, FALL);

        assert_eq!(outcome, Outcome::Rejected(RejectReason::MotorRunning));
        assert_eq!(deck.state(), DeckState::Closing);
        assert_eq!(deck.motor().calls.len(), 1);
    }

    #[test]
    fn test_limit_stops_running_motor() {
        let runtime = RuntimeState::default();
        let (dispatcher, mut deck) = setup(&runtime);
        let mut inputs = Inputs::default();
        inputs.set(InputId::TriggerClose, true);

        dispatcher.dispatch(&mut deck, &inputs, TRIGGER_CLOSE, FALL);
        assert!(runtime.is_motor_running());

        inputs.set(InputId::LimitedClose, true);
        let outcome = dispatcher.dispatch(&mut deck, &inputs, LIMITED_CLOSE, RISE);

        assert_eq!(outcome, Outcome::Stopped);
        assert!(!runtime.is_motor_running());
        assert_eq!(deck.state(), DeckState::Idle);
        assert_eq!(deck.motor().calls.last(), Some(&Call::Stop));
    }

    #[test]
    fn test_limit_while_idle_ignored() {
        let runtime = RuntimeState::default();
        let (dispatcher, mut deck) = setup(&runtime);
        let mut inputs = Inputs::default();
        inputs.set(InputId::LimitedOpen, true);

        let outcome = dispatcher.dispatch(&mut deck, &inputs, LIMITED_OPEN, RISE);
        assert_eq!(outcome, Outcome::Ignored);
        assert!(deck.motor().calls.is_empty());
    }

    #[test]
    fn test_limit_bounce_ignored() {
        let runtime = RuntimeState::default();
        let (dispatcher, mut deck) = setup(&runtime);
        let mut inputs = Inputs::default();
        inputs.set(InputId::TriggerOpen, true);
        dispatcher.dispatch(&mut deck, &inputs, TRIGGER_OPEN, FALL);

        // Edge arrived but the level has already dropped again
        let outcome = dispatcher.dispatch(&mut deck, &inputs, LIMITED_OPEN, RISE);
        assert_eq!(outcome, Outcome::Ignored);
        assert!(runtime.is_motor_running());
    }

    #[test]
    fn test_power_scenario() {
        let runtime = RuntimeState::new(8000, 9000);
        let (dispatcher, mut deck) = setup(&runtime);
        let mut inputs = Inputs::default();
        inputs.set(InputId::LinkedPower, true);

        let outcome = dispatcher.dispatch(&mut deck, &inputs, LINKED_POWER, RISE);
        assert_eq!(outcome, Outcome::Started(Direction::Open));

        inputs.set(InputId::LimitedOpen, true);
        let outcome = dispatcher.dispatch(&mut deck, &inputs, LIMITED_OPEN, RISE);
        assert_eq!(outcome, Outcome::Stopped);

        // Power lost: close regardless of the open limit
        inputs.set(InputId::LinkedPower, false);
        inputs.set(InputId::LimitedOpen, false);
        let outcome = dispatcher.dispatch(&mut deck, &inputs, LINKED_POWER, FALL);
        assert_eq!(outcome, Outcome::Started(Direction::Close));

        assert_eq!(
            deck.motor().calls.as_slice(),
            &[
                Call::Drive(Direction::Open, 8000),
                Call::Stop,
                Call::Drive(Direction::Close, 9000),
            ]
        );
    }

    #[test]
    fn test_unmatched_events_ignored() {
        let runtime = RuntimeState::default();
        let (dispatcher, mut deck) = setup(&runtime);
        let mut inputs = Inputs::default();
        inputs.set(InputId::TriggerOpen, true);

        assert_eq!(
            dispatcher.dispatch(&mut deck, &inputs, 3, FALL),
            Outcome::Ignored
        );
        assert_eq!(
            dispatcher.dispatch(&mut deck, &inputs, TRIGGER_OPEN, EdgeEvents::LEVEL_LOW),
            Outcome::Ignored
        );
        assert!(deck.motor().calls.is_empty());
    }

    #[test]
    fn test_trigger_acknowledges_fault() {
        let runtime = RuntimeState::default();
        let (dispatcher, mut deck) = setup(&runtime);
        let mut inputs = Inputs::default();
        inputs.set(InputId::TriggerOpen, true);

        dispatcher.dispatch(&mut deck, &inputs, TRIGGER_OPEN, FALL);
        assert_eq!(deck.tick(1000), Some(ErrorKind::MotorStallTimeout));
        let writes = deck.motor().calls.len();

        // Limit edges and power edges do not clear the fault
        inputs.set(InputId::LinkedPower, true);
        assert_eq!(
            dispatcher.dispatch(&mut deck, &inputs, LINKED_POWER, RISE),
            Outcome::Rejected(RejectReason::Faulted)
        );

        assert_eq!(
            dispatcher.dispatch(&mut deck, &inputs, TRIGGER_OPEN, FALL),
            Outcome::FaultCleared
        );
        assert_eq!(deck.motor().calls.len(), writes);

        assert_eq!(
            dispatcher.dispatch(&mut deck, &inputs, TRIGGER_OPEN, FALL),
            Outcome::Started(Direction::Open)
        );
    }

    #[test]
    fn test_trigger_close_survives_supervisor_ticks() {
        let config = DeckConfig::default();
        let runtime = RuntimeState::default();
        let (_, mut deck) = setup(&runtime);
        let dispatcher = Dispatcher::from_config(&config);
        let mut supervisor = Supervisor::new(&config.supervisor);

        // Deck open with linked power present
        let mut inputs = Inputs::default();
        inputs.set(InputId::LinkedPower, true);
        inputs.set(InputId::LimitedOpen, true);

        inputs.set(InputId::TriggerClose, true);
        assert_eq!(
            dispatcher.dispatch(&mut deck, &inputs, TRIGGER_CLOSE, FALL),
            Outcome::Started(Direction::Close)
        );
        inputs.set(InputId::TriggerClose, false);
        inputs.set(InputId::LimitedOpen, false);

        inputs.set(InputId::LimitedClose, true);
        assert_eq!(
            dispatcher.dispatch(&mut deck, &inputs, LIMITED_CLOSE, RISE),
            Outcome::Stopped
        );
        let writes = deck.motor().calls.len();

        // A minute of ticks, the way the deck task drives them
        for _ in 0..600 {
            assert_eq!(deck.tick(100), None);
            deck.check_limits(&inputs);
            if supervisor.update_time(100) {
                deck.run(&inputs);
            }
        }

        assert_eq!(deck.state(), DeckState::Idle);
        assert!(!runtime.is_motor_running());
        assert_eq!(deck.motor().calls.len(), writes);

        // The next power edge applies the policy again
        assert_eq!(
            dispatcher.dispatch(&mut deck, &inputs, LINKED_POWER, RISE),
            Outcome::Started(Direction::Open)
        );
    }
}
