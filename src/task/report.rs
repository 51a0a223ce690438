//! Reading reports
//!
//! Turns system events into log lines. Individual failures are reported every
//! cycle; the alarm only on its raised/recovered edges.

use defmt::{error, info, warn};
use ranging_core::{Notification, RangingOutcome};

use crate::system::event::{self, Events};

/// Report task
#[embassy_executor::task]
pub async fn report() {
    loop {
        match event::wait().await {
            Events::MeasurementsStarted => info!("measurements started"),
            Events::MeasurementsStopped => info!("measurements stopped"),
            Events::Reading {
                at,
                outcome: RangingOutcome::Distance(cm),
            } => {
                let tenths = to_tenths(cm);
                info!("{} - Distance: {}.{} cm", at, tenths / 10, tenths % 10);
            }
            Events::Reading {
                at,
                outcome: RangingOutcome::Failure(reason),
            } => warn!("{} - sensor read failure ({})", at, reason),
            Events::Alarm(Notification::AlarmRaised) => {
                error!("ALARM: sensor disconnected or inoperative!")
            }
            Events::Alarm(Notification::Recovered) => {
                info!("sensor reconnected, measurements resumed")
            }
        }
    }
}

/// Rounds centimeters to tenths, since defmt has no float precision hint
fn to_tenths(cm: f32) -> u32 {
    (cm * 10.0 + 0.5) as u32
}
