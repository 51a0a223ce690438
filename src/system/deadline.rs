//! Echo Deadline Module
//!
//! Bridges [`DeadlineAlarm`] to the deadline task on the high-priority executor.
//! Arm and cancel requests travel over a signal; a cancel that overwrites a pending
//! arm is fine because the capture state already knows the measurement is over.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant};
use ranging_core::{AlarmHandle, DeadlineAlarm};

/// Signal for deadline requests
static DEADLINE: Signal<CriticalSectionRawMutex, Request> = Signal::new();

/// Waits for the next deadline request
pub async fn wait() -> Request {
    DEADLINE.wait().await
}

/// Deadline request for the deadline task
#[derive(Debug, Clone, Copy)]
pub enum Request {
    /// Expire `handle` at `expires_at` unless cancelled first
    Arm {
        handle: AlarmHandle,
        expires_at: Instant,
    },
    /// The echo arrived; drop the deadline for this handle
    Cancel(AlarmHandle),
}

/// [`DeadlineAlarm`] backed by the deadline task
///
/// Stateless, so the echo task can hold its own copy for cancelling.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlineSignal;

impl DeadlineAlarm for DeadlineSignal {
    fn schedule(&mut self, handle: AlarmHandle, after_us: u64) {
        DEADLINE.signal(Request::Arm {
            handle,
            expires_at: Instant::now() + Duration::from_micros(after_us),
        });
    }

    fn cancel(&mut self, handle: AlarmHandle) {
        DEADLINE.signal(Request::Cancel(handle));
    }
}
