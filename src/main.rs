//! Range finder firmware entry point
//!
//! Sets up two executors: the thread-mode executor runs the ranging loop, console
//! and reporting; a higher-priority interrupt executor runs the echo capture and
//! the echo deadline so they can preempt the ranging loop's spin-wait.

#![no_std]
#![no_main]

use crate::task::{
    command_input::command_input, deadline_timer::deadline_timer, echo_capture::echo_capture,
    range_measure::range_measure, report::report,
};
use defmt::info;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::{Duration, Timer};
use system::resources::{
    AssignedResources, ConsoleResources, EchoResources, TriggerResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Settling time for the sensor and the debug probe after power-up
const STARTUP_DELAY: Duration = Duration::from_secs(2);

/// Executor for the echo edge and deadline tasks
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each task
    let r = split_resources!(p);

    Timer::after(STARTUP_DELAY).await;
    info!("range finder ready");

    // Capture context first, so no edge or deadline is missed once ranging starts
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(echo_capture(r.ranging_echo)).unwrap();
    high.spawn(deadline_timer()).unwrap();

    spawner.spawn(report()).unwrap();
    spawner.spawn(range_measure(r.ranging_trigger)).unwrap();
    spawner.spawn(command_input(r.console)).unwrap();
}
