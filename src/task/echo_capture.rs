//! Echo edge capture
//!
//! Timestamps both edges of the HC-SR04 echo pulse. Runs on the high-priority
//! executor, so it preempts the ranging loop's spin-wait the way a GPIO interrupt
//! handler would.
//!
//! # Operation
//! - Rising edge: start of the pulse is recorded
//! - Falling edge: end is recorded, the measurement completes and its deadline is
//!   cancelled
//! - Edges outside a measurement are dropped by the capture state

use embassy_rp::gpio::{Input, Pull};
use embassy_time::Instant;
use ranging_core::DeadlineAlarm;

use crate::system::capture::PULSE_TIMER;
use crate::system::deadline::DeadlineSignal;
use crate::system::resources::EchoResources;

/// Echo capture task
#[embassy_executor::task]
pub async fn echo_capture(r: EchoResources) {
    // Pull-down keeps the line low when the sensor is unplugged
    let mut echo = Input::new(r.echo_pin, Pull::Down);
    let mut deadline = DeadlineSignal;

    loop {
        echo.wait_for_rising_edge().await;
        PULSE_TIMER.on_rising_edge(Instant::now().as_micros());

        echo.wait_for_falling_edge().await;
        if let Some(handle) = PULSE_TIMER.on_falling_edge(Instant::now().as_micros()) {
            deadline.cancel(handle);
        }
    }
}
