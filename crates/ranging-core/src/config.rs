//! Ranging configuration
//!
//! Reference values match the HC-SR04 datasheet timing: a 10us trigger pulse and a
//! 30ms ceiling on the echo, which is well past the sensor's ~4m range.

use crate::error::ConfigError;

/// Trigger pulse width in microseconds
pub const TRIGGER_PULSE_US: u32 = 10;

/// Maximum wait for the echo to fall, in microseconds after arming
pub const ECHO_TIMEOUT_US: u64 = 30_000;

/// Speed of sound at ~20°C in centimeters per microsecond
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// Consecutive failures before the sensor is reported as disconnected
pub const FAILURE_THRESHOLD: u32 = 3;

/// Timing and conversion parameters for one ranging cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// How long the trigger line is held high
    pub trigger_pulse_us: u32,
    /// Deadline armed after the trigger, bounding the spin-wait
    pub echo_timeout_us: u64,
    /// Round-trip speed used for the conversion, halved internally
    pub speed_of_sound_cm_per_us: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger_pulse_us: TRIGGER_PULSE_US,
            echo_timeout_us: ECHO_TIMEOUT_US,
            speed_of_sound_cm_per_us: SPEED_OF_SOUND_CM_PER_US,
        }
    }
}

impl Config {
    /// Rejects settings that would make every cycle fail or hang.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_pulse_us == 0 {
            return Err(ConfigError::ZeroTriggerPulse);
        }
        if self.echo_timeout_us == 0 {
            return Err(ConfigError::ZeroEchoTimeout);
        }
        if !(self.speed_of_sound_cm_per_us.is_finite() && self.speed_of_sound_cm_per_us > 0.0) {
            return Err(ConfigError::InvalidSpeedOfSound);
        }
        Ok(())
    }
}
