//! One ranging cycle
//!
//! # Cycle
//! 1. Reset the measurement window
//! 2. Pulse the trigger line high for [`Config::trigger_pulse_us`]
//! 3. Mark the measurement in progress and arm the echo deadline
//! 4. Spin until the falling edge or the deadline resolves the measurement
//! 5. Convert the window into a [`RangingOutcome`]
//!
//! The spin in step 4 is intentional: the edge and deadline handlers run in
//! interrupt context and preempt it, and the deadline armed in step 3 bounds it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::Config;
use crate::error::ConfigError;
use crate::pulse_timer::{MeasurementWindow, PulseTimer};
use crate::timeout_guard::{DeadlineAlarm, TimeoutGuard};

/// Why a cycle produced no distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailureReason {
    /// No complete echo before the deadline
    Timeout,
    /// Falling edge seen without a rising edge in the same cycle
    InvalidEdgeOrder,
}

/// Result of one ranging cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangingOutcome {
    /// Distance to the target in centimeters, always positive
    Distance(f32),
    Failure(FailureReason),
}

impl RangingOutcome {
    /// Interprets a captured window.
    ///
    /// | start | end | outcome |
    /// |-------|-----|---------|
    /// | set | set, later than start | `Distance` |
    /// | unset | set | `Failure(InvalidEdgeOrder)` |
    /// | anything else | | `Failure(Timeout)` |
    pub fn from_window(window: &MeasurementWindow, speed_of_sound_cm_per_us: f32) -> Self {
        if let Some(width) = window.pulse_width_us() {
            return Self::Distance(distance_cm(width, speed_of_sound_cm_per_us));
        }
        match (window.start, window.end) {
            (None, Some(_)) => Self::Failure(FailureReason::InvalidEdgeOrder),
            _ => Self::Failure(FailureReason::Timeout),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Distance(_))
    }

    pub fn distance_cm(&self) -> Option<f32> {
        match self {
            Self::Distance(cm) => Some(*cm),
            Self::Failure(_) => None,
        }
    }
}

/// Converts an echo high time into a one-way distance.
pub fn distance_cm(pulse_width_us: u64, speed_of_sound_cm_per_us: f32) -> f32 {
    // Sound travels to the target and back
    pulse_width_us as f32 * speed_of_sound_cm_per_us / 2.0
}

/// Anything that can run one ranging cycle
pub trait Ranging {
    fn measure(&mut self) -> RangingOutcome;
}

/// Drives the trigger line and waits on the shared [`PulseTimer`]
///
/// Owns the trigger pin and the deadline for its whole lifetime, and `measure` takes
/// `&mut self`, so cycles can never overlap.
pub struct RangingOperation<'a, P, D, A> {
    timer: &'a PulseTimer,
    trigger: P,
    delay: D,
    guard: TimeoutGuard<A>,
    config: Config,
}

impl<'a, P, D, A> RangingOperation<'a, P, D, A>
where
    P: OutputPin,
    D: DelayNs,
    A: DeadlineAlarm,
{
    pub fn new(
        timer: &'a PulseTimer,
        trigger: P,
        delay: D,
        alarm: A,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            timer,
            trigger,
            delay,
            guard: TimeoutGuard::new(alarm),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn guard(&self) -> &TimeoutGuard<A> {
        &self.guard
    }

    fn pulse_trigger(&mut self) -> Result<(), P::Error> {
        self.trigger.set_high()?;
        self.delay.delay_us(self.config.trigger_pulse_us);
        self.trigger.set_low()
    }
}

impl<P, D, A> Ranging for RangingOperation<'_, P, D, A>
where
    P: OutputPin,
    D: DelayNs,
    A: DeadlineAlarm,
{
    fn measure(&mut self) -> RangingOutcome {
        self.timer.reset();

        if self.pulse_trigger().is_err() {
            let _ = self.trigger.set_low();
            warn!("trigger pin fault, no echo expected");
            return RangingOutcome::Failure(FailureReason::Timeout);
        }

        if let Err(e) = self.guard.arm(self.timer, self.config.echo_timeout_us) {
            error!("echo deadline not armed: {:?}", e);
            return RangingOutcome::Failure(FailureReason::Timeout);
        }

        while self.timer.is_measuring() {
            core::hint::spin_loop();
        }

        let outcome = RangingOutcome::from_window(
            &self.timer.take_window(),
            self.config.speed_of_sound_cm_per_us,
        );
        debug!("ranging outcome: {:?}", outcome);
        outcome
    }
}
