//! System Events
//!
//! Everything the ranging loop has to say, queued for the report task so the loop
//! never blocks on log output for long.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use ranging_core::{Notification, RangingOutcome, TimeOfDay};

/// Single-producer, single-consumer event channel with capacity of 10
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Events, 10> = Channel::new();

/// Sends an event to the report task
pub async fn send(event: Events) {
    EVENT_CHANNEL.sender().send(event).await;
}

/// Receives the next event
pub async fn wait() -> Events {
    EVENT_CHANNEL.receiver().receive().await
}

/// Range finder events
#[derive(Debug, Clone, Copy)]
pub enum Events {
    /// Operator started measurements
    MeasurementsStarted,
    /// Operator stopped measurements
    MeasurementsStopped,
    /// One ranging cycle completed
    Reading {
        /// Time of day when the cycle began
        at: TimeOfDay,
        outcome: RangingOutcome,
    },
    /// Failure streak alarm changed state
    Alarm(Notification),
}
