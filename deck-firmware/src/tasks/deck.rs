//! Deck task
//!
//! The edge-handling context. Owns the controller, the dispatcher and the
//! input bank, and waits for the next edge on any monitored pin or the
//! next tick. Each wake-up is handled to completion before the next wait,
//! so edges are processed one at a time in arrival order.

use defmt::*;
use embassy_futures::select::{select, select_array, Either};

use deck_core::config::DeckConfig;
use deck_core::controller::{DeckController, Dispatcher, Outcome, Supervisor};
use deck_core::state::RuntimeState;
use deck_core::traits::InputId;
use deck_drivers::input::DeckSignals;
use deck_hal::EdgeEvents;
use deck_hal_rp2040::RpInput;

use super::tick::TICK_SIGNAL;
use crate::board::DeckMotor;
use crate::channels::FAULT_STATE;

/// What woke the deck task
enum Wake {
    Edge(InputId, EdgeEvents),
    Tick(u32),
}

#[embassy_executor::task]
pub async fn deck_task(
    motor: DeckMotor,
    mut signals: DeckSignals<RpInput>,
    runtime: &'static RuntimeState,
    config: DeckConfig,
) {
    info!("Deck task started");

    let mut deck = DeckController::new(motor, runtime, &config.safety);
    let dispatcher = Dispatcher::from_config(&config);
    let mut supervisor = Supervisor::new(&config.supervisor);

    // Logical edges to wait for on each input; none for unbound inputs
    let mut edges = [EdgeEvents::NONE; 5];
    for binding in dispatcher.bindings() {
        edges[binding.input as usize] = binding.edges;
    }

    if supervisor.is_enabled() {
        report("boot", deck.run(&signals));
    }

    let mut last_tick_ms = 0u32;

    loop {
        let wake = {
            let [limited_close, limited_open, trigger_close, trigger_open, linked_power] =
                signals.pins_mut();
            let waits = [
                limited_close.wait_for_edge(edges[0]),
                limited_open.wait_for_edge(edges[1]),
                trigger_close.wait_for_edge(edges[2]),
                trigger_open.wait_for_edge(edges[3]),
                linked_power.wait_for_edge(edges[4]),
            ];

            match select(select_array(waits), TICK_SIGNAL.wait()).await {
                Either::First((events, index)) => Wake::Edge(InputId::ALL[index], events),
                Either::Second(now_ms) => Wake::Tick(now_ms),
            }
        };

        match wake {
            Wake::Edge(input, events) => {
                let pin = signals.config(input).pin;
                let level = if signals.is_high(input) { "HIGH" } else { "LOW" };
                debug!("GPIO {} {} {}", pin, events, level);

                let outcome = dispatcher.dispatch(&mut deck, &signals, pin, events);
                report(input.name(), outcome);

                if input == InputId::LinkedPower {
                    supervisor.reset();
                }
                if outcome == Outcome::FaultCleared {
                    FAULT_STATE.signal(None);
                }
            }
            Wake::Tick(now_ms) => {
                let delta_ms = now_ms.wrapping_sub(last_tick_ms);
                last_tick_ms = now_ms;

                if let Some(kind) = deck.tick(delta_ms) {
                    error!(
                        "Motor ran {} ms without reaching a limit: {}",
                        deck.watchdog().timeout_ms(),
                        kind
                    );
                    FAULT_STATE.signal(Some(kind));
                }

                let outcome = deck.check_limits(&signals);
                if outcome.actuated() {
                    warn!("Limit found asserted on tick, motor stopped");
                }

                if supervisor.update_time(delta_ms) {
                    let outcome = deck.run(&signals);
                    if outcome.actuated() {
                        report("supervisor", outcome);
                    } else {
                        trace!("supervisor: {}", outcome);
                    }
                }
            }
        }
    }
}

/// Log a controller outcome
fn report(source: &str, outcome: Outcome) {
    match outcome {
        Outcome::Started(direction) => info!("{}: motor started ({})", source, direction),
        Outcome::Stopped => info!("{}: motor stopped", source),
        Outcome::Rejected(reason) => debug!("{}: rejected ({})", source, reason),
        Outcome::Ignored => trace!("{}: ignored", source),
        Outcome::FaultCleared => info!("{}: fault acknowledged", source),
    }
}
