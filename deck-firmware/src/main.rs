//! Deckhand - Keyboard Deck Actuator Firmware
//!
//! Main firmware binary for the RP2040 deck board. Drives one DC motor
//! through an H-bridge between two limit switches, on request from two
//! trigger buttons and from the linked-power sense line.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use deck_core::state::RuntimeState;
use deck_hal_rp2040::PinBank;

use crate::board::Board;
use crate::config::load_config;

mod board;
mod channels;
mod config;
mod tasks;

// Shared with the status task, must live forever
static RUNTIME: StaticCell<RuntimeState> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Deckhand firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let sys_clk_hz = embassy_rp::clocks::clk_sys_freq();
    info!("Peripherals initialized, clk_sys = {} Hz", sys_clk_hz);

    let config = load_config(sys_clk_hz);

    let (mut bank, rest) = PinBank::from_peripherals(p);
    let board = unwrap!(Board::init(&mut bank, rest, &config, sys_clk_hz));
    if let Ok(divider_x16) = config.pwm.divider_x16(sys_clk_hz) {
        info!(
            "Motor PWM: {} Hz requested, {} Hz actual, wrap {}",
            config.pwm.frequency_hz,
            config.pwm.actual_frequency_hz(sys_clk_hz, divider_x16),
            config.pwm.wrap
        );
    }
    info!(
        "Motor duty: open {}, close {}",
        config.motor.speed_open, config.motor.speed_close
    );

    let runtime: &'static RuntimeState = RUNTIME.init(RuntimeState::from_config(&config.motor));

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::status_task(board.indicator, runtime))
        .unwrap();
    spawner
        .spawn(tasks::deck_task(board.motor, board.signals, runtime, config))
        .unwrap();

    info!("System is ready");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
