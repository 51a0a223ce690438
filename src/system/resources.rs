//! Hardware Resource Management
//!
//! Allocates pins and peripherals to the tasks that own them. The trigger and echo
//! lines are split on purpose: the echo is watched from the high-priority executor,
//! while the trigger belongs to the ranging loop in thread mode.
//!
//! # Resource Groups
//! - Ranging trigger: HC-SR04 trigger output
//! - Ranging echo: HC-SR04 echo input
//! - Console: UART0 receiver for start/stop keystrokes

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{self, UART0};
use embassy_rp::uart::InterruptHandler as UartInterruptHandler;

assign_resources! {
    /// HC-SR04 trigger line, pulsed once per measurement
    ranging_trigger: TriggerResources {
        trigger_pin: PIN_14,
    },
    /// HC-SR04 echo line, high for the round-trip time of the ping
    ranging_echo: EchoResources {
        echo_pin: PIN_15,
    },
    /// Serial console receiver (115200 8N1)
    console: ConsoleResources {
        uart: UART0,
        rx_pin: PIN_1,
        rx_dma: DMA_CH0,
    },
}

bind_interrupts!(pub struct Irqs {
    UART0_IRQ => UartInterruptHandler<UART0>;
});
