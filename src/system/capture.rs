//! Shared echo capture
//!
//! The single [`PulseTimer`] written by the echo and deadline tasks on the
//! high-priority executor and read by the ranging loop in thread mode. All access
//! goes through a critical section inside `PulseTimer`.

use ranging_core::PulseTimer;

/// Echo capture state for the one HC-SR04 on the board
pub static PULSE_TIMER: PulseTimer = PulseTimer::new();
