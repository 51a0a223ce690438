//! Error types
//!
//! Measurement failures are not errors; they are reported as
//! [`RangingOutcome::Failure`](crate::RangingOutcome::Failure). The types here
//! cover misuse and misconfiguration only.

use thiserror_no_std::Error;

use crate::timeout_guard::AlarmHandle;

/// Invalid [`Config`](crate::Config) values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("trigger pulse width must be non-zero")]
    ZeroTriggerPulse,
    #[error("echo timeout must be non-zero")]
    ZeroEchoTimeout,
    #[error("speed of sound must be positive and finite")]
    InvalidSpeedOfSound,
}

/// Arming a timeout guard failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArmError {
    /// A previous deadline is still live; only one may be armed per measurement
    #[error("timeout guard already armed with {0:?}")]
    AlreadyArmed(AlarmHandle),
}
