//! Echo deadline timer
//!
//! One-shot timer behind [`DeadlineSignal`](crate::system::deadline::DeadlineSignal).
//! Runs on the high-priority executor so an expiry can end the ranging loop's
//! spin-wait. Expiry goes through `ranging_core::timeout_guard::expire`, which is a
//! no-op if the echo already completed the measurement.

use defmt::debug;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;
use ranging_core::timeout_guard;

use crate::system::capture::PULSE_TIMER;
use crate::system::deadline::{self, Request};

/// Deadline timer task
#[embassy_executor::task]
pub async fn deadline_timer() {
    let mut request = deadline::wait().await;

    loop {
        request = match request {
            Request::Cancel(_) => deadline::wait().await,
            Request::Arm { handle, expires_at } => {
                match select(Timer::at(expires_at), deadline::wait()).await {
                    Either::First(()) => {
                        if timeout_guard::expire(&PULSE_TIMER, handle) {
                            debug!("no echo before deadline {}", handle.id());
                        }
                        deadline::wait().await
                    }
                    // A cancel for an older handle must not drop this deadline
                    Either::Second(Request::Cancel(stale)) if stale != handle => request,
                    Either::Second(next) => next,
                }
            }
        };
    }
}
