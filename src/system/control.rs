//! Measurement Control Module
//!
//! Carries operator start/stop commands from the console task to the ranging loop.
//! A newer command replaces one that has not been picked up yet.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use ranging_core::Command;

/// Signal for operator commands
static CONTROL: Signal<CriticalSectionRawMutex, Command> = Signal::new();

/// Issues a new command
pub fn update(command: Command) {
    CONTROL.signal(command);
}

/// Waits for the next command
pub async fn wait() -> Command {
    CONTROL.wait().await
}
