//! Operator commands
//!
//! Single keystrokes received over the serial console start and stop the
//! measurement loop.

/// Operator command decoded from one received byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Begin measuring; clears any failure streak and alarm
    Start,
    /// Stop measuring until the next [`Command::Start`]
    Stop,
}

impl Command {
    /// Decodes a keystroke. `s` starts and `p` stops, in either case.
    pub fn from_key(key: u8) -> Option<Self> {
        match key.to_ascii_lowercase() {
            b's' => Some(Self::Start),
            b'p' => Some(Self::Stop),
            _ => None,
        }
    }
}
