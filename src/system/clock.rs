//! Wall clock for log time stamps
//!
//! The RP2350 has no calendar RTC, so the time of day is the boot-time seed plus
//! uptime. It is only used to stamp readings.

use embassy_time::Instant;
use ranging_core::TimeOfDay;

/// Time of day assumed at boot
const CLOCK_SEED: TimeOfDay = TimeOfDay::from_hms(22, 10, 0);

/// Current time of day
pub fn now() -> TimeOfDay {
    CLOCK_SEED.advanced_by(Instant::now().as_secs())
}
