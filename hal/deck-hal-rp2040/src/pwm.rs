//! PWM slice wrapper
//!
//! Drives channel A of one PWM slice as a raw compare level. The wrap
//! value and clock divider come from validated [`PwmSettings`].

use deck_core::config::{ConfigError, PwmSettings};
use deck_hal::PwmOutput;
use embassy_rp::pwm::{ChannelAPin, Config as PwmConfig, Pwm, Slice};
use embassy_rp::Peri;
use fixed::types::extra::U4;
use fixed::FixedU16;

/// Channel A of a PWM slice
pub struct RpPwm {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl RpPwm {
    /// Configure the slice for `settings` and start at 0% duty
    ///
    /// Fails if the requested frequency needs a divider outside the
    /// hardware range at `sys_clk_hz`.
    pub fn new<T: Slice>(
        slice: Peri<'static, T>,
        pin: Peri<'static, impl ChannelAPin<T>>,
        settings: &PwmSettings,
        sys_clk_hz: u32,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let divider_x16 = settings.divider_x16(sys_clk_hz)?;

        let mut config = PwmConfig::default();
        config.top = settings.wrap;
        config.divider = FixedU16::<U4>::from_bits(divider_x16);
        config.compare_a = 0;

        let pwm = Pwm::new_output_a(slice, pin, config.clone());
        Ok(Self { pwm, config })
    }
}

impl PwmOutput for RpPwm {
    fn set_duty(&mut self, level: u16) {
        self.config.compare_a = level;
        self.pwm.set_config(&self.config);
    }

    fn duty(&self) -> u16 {
        self.config.compare_a
    }
}
