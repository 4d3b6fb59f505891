//! H-bridge DC motor driver
//!
//! Two direction lines (IN1/IN2) select the current path through the
//! bridge and one PWM channel sets the drive strength:
//!
//! | direction | IN1  | IN2  |
//! |-----------|------|------|
//! | Close     | high | low  |
//! | Open      | low  | high |
//! | stopped   | low  | low  |
//!
//! IN1 and IN2 are never high at the same time. On a direction change the
//! duty is dropped to zero and the inactive line released before the active
//! line is raised.

use deck_core::traits::{Direction, MotorDriver};
use deck_hal::{OutputPin, PwmOutput};

/// H-bridge motor on two direction pins and a PWM channel
pub struct HBridgeMotor<A, B, P> {
    in1: A,
    in2: B,
    pwm: P,
}

impl<A: OutputPin, B: OutputPin, P: PwmOutput> HBridgeMotor<A, B, P> {
    /// Create a new driver; the bridge starts stopped
    pub fn new(in1: A, in2: B, pwm: P) -> Self {
        let mut motor = Self { in1, in2, pwm };
        motor.stop();
        motor
    }
}

impl<A: OutputPin, B: OutputPin, P: PwmOutput> MotorDriver for HBridgeMotor<A, B, P> {
    fn drive(&mut self, direction: Direction, duty: u16) {
        self.pwm.disable();

        match direction {
            Direction::Close => {
                self.in2.set_low();
                self.in1.set_high();
            }
            Direction::Open => {
                self.in1.set_low();
                self.in2.set_high();
            }
        }

        self.pwm.set_duty(duty);
    }

    fn stop(&mut self) {
        self.in1.set_low();
        self.in2.set_low();
        self.pwm.disable();
    }
}
