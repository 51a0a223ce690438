//! Console command input
//!
//! Reads single keystrokes from UART0 and forwards start/stop commands to the
//! ranging loop. Unknown keys are ignored.

use defmt::{info, warn};
use embassy_rp::uart::{Config, UartRx};
use ranging_core::Command;

use crate::system::control;
use crate::system::resources::{ConsoleResources, Irqs};

/// Console input task
#[embassy_executor::task]
pub async fn command_input(r: ConsoleResources) {
    let mut rx = UartRx::new(r.uart, r.rx_pin, Irqs, r.rx_dma, Config::default());
    let mut key = [0u8; 1];

    info!("press 's' to start measurements and 'p' to stop them");

    loop {
        if let Err(e) = rx.read(&mut key).await {
            warn!("console read failed: {}", e);
            continue;
        }
        if let Some(command) = Command::from_key(key[0]) {
            control::update(command);
        }
    }
}
