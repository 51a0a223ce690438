//! Hardware-independent core of the pulse-echo range finder
//!
//! Everything that decides *what* a measurement means lives here: capturing the
//! echo edges, bounding the wait with a one-shot deadline, turning the pulse width
//! into centimeters and debouncing repeated failures into a single alarm.
//!
//! The crate is `no_std` and only talks to hardware through `embedded-hal` traits
//! and the [`DeadlineAlarm`] trait, so it runs unchanged on the RP2350 firmware and
//! in host tests.
//!
//! # Data flow
//! ```text
//! echo edges -> PulseTimer -> RangingOperation -> FailureStreakMonitor -> report
//!                   ^               |
//!                   +-- TimeoutGuard (expiry resets the window)
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod monitor;
pub mod pulse_timer;
pub mod ranging;
pub mod session;
pub mod timeout_guard;

pub use clock::TimeOfDay;
pub use command::Command;
pub use config::Config;
pub use error::{ArmError, ConfigError};
pub use monitor::{FailureStreakMonitor, Notification, StreakState};
pub use pulse_timer::{MeasurementWindow, PulseTimer};
pub use ranging::{FailureReason, Ranging, RangingOperation, RangingOutcome};
pub use session::{Cycle, Session};
pub use timeout_guard::{AlarmHandle, DeadlineAlarm, TimeoutGuard};
