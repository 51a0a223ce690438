//! Wall-clock time of day for stamping readings
//!
//! The RP2350 has no calendar RTC, so the firmware seeds a [`TimeOfDay`] at boot and
//! advances it by the monotonic uptime. Only the time of day is tracked; readings are
//! stamped `HH:MM:SS`.

use core::fmt;

/// Seconds in one day, the wrap-around point of [`TimeOfDay`]
const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Time of day with one-second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    /// Seconds since midnight, always below [`SECONDS_PER_DAY`]
    seconds: u32,
}

impl TimeOfDay {
    /// Midnight
    pub const MIDNIGHT: Self = Self { seconds: 0 };

    /// Builds a time of day from its clock fields.
    ///
    /// Out-of-range fields wrap around the day, so `24:00:00` is midnight.
    pub const fn from_hms(hour: u8, minute: u8, second: u8) -> Self {
        let seconds = hour as u32 * 3600 + minute as u32 * 60 + second as u32;
        Self {
            seconds: seconds % SECONDS_PER_DAY,
        }
    }

    /// Returns the time of day reached after `elapsed_secs` seconds
    pub fn advanced_by(self, elapsed_secs: u64) -> Self {
        let offset = (elapsed_secs % SECONDS_PER_DAY as u64) as u32;
        Self {
            seconds: (self.seconds + offset) % SECONDS_PER_DAY,
        }
    }

    pub fn hour(&self) -> u8 {
        (self.seconds / 3600) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.seconds / 60 % 60) as u8
    }

    pub fn second(&self) -> u8 {
        (self.seconds % 60) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeOfDay {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u8:02}:{=u8:02}:{=u8:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}
