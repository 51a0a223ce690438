//! Distance measurement loop
//!
//! Runs one HC-SR04 ranging cycle per interval while measurements are enabled and
//! feeds each outcome through the failure streak monitor.
//!
//! # Sensor Operation
//! - 10us trigger pulse, echo deadline 30ms after the trigger
//! - The cycle spin-waits in thread mode; the echo and deadline tasks preempt it
//!   from the high-priority executor
//! - One measurement per second
//!
//! # Error Handling
//! - A missing or malformed echo is a failed reading, reported and skipped
//! - Three failures in a row raise the sensor-disconnected alarm, the next good
//!   reading clears it
//! - Starting measurements again clears the streak

use defmt::error;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Delay, Duration, Timer};
use ranging_core::{Command, Config, FailureStreakMonitor, Ranging, RangingOperation, Session};

use crate::system::capture::PULSE_TIMER;
use crate::system::deadline::DeadlineSignal;
use crate::system::event::{self, Events};
use crate::system::resources::TriggerResources;
use crate::system::{clock, control};

/// Time between measurements
const MEASUREMENT_INTERVAL: Duration = Duration::from_millis(1000);

/// Ranging loop task
#[embassy_executor::task]
pub async fn range_measure(r: TriggerResources) {
    let trigger = Output::new(r.trigger_pin, Level::Low);

    let operation = match RangingOperation::new(
        &PULSE_TIMER,
        trigger,
        Delay,
        DeadlineSignal,
        Config::default(),
    ) {
        Ok(operation) => operation,
        Err(e) => {
            error!("ranging disabled, invalid configuration: {}", e);
            return;
        }
    };
    let mut session = Session::new(operation, FailureStreakMonitor::default());

    loop {
        if !session.is_running() {
            apply(&mut session, control::wait().await).await;
            continue;
        }

        let at = clock::now();
        if let Some(cycle) = session.cycle() {
            event::send(Events::Reading {
                at,
                outcome: cycle.outcome,
            })
            .await;
            if let Some(notification) = cycle.notification {
                event::send(Events::Alarm(notification)).await;
            }
        }

        // Wait for the next interval, but react to start/stop right away
        if let Either::Second(command) =
            select(Timer::after(MEASUREMENT_INTERVAL), control::wait()).await
        {
            apply(&mut session, command).await;
        }
    }
}

/// Applies an operator command and acknowledges it
async fn apply<R: Ranging>(session: &mut Session<R>, command: Command) {
    session.apply(command);
    let event = match command {
        Command::Start => Events::MeasurementsStarted,
        Command::Stop => Events::MeasurementsStopped,
    };
    event::send(event).await;
}
