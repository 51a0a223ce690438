//! Start/stop measurement session
//!
//! Couples a [`Ranging`] implementation with the [`FailureStreakMonitor`] and
//! applies operator [`Command`]s. Starting a session clears any previous streak, so
//! an alarm from an earlier run never carries over.

use crate::command::Command;
use crate::monitor::{FailureStreakMonitor, Notification};
use crate::ranging::{Ranging, RangingOutcome};

/// What one polling iteration produced
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    pub outcome: RangingOutcome,
    pub notification: Option<Notification>,
}

pub struct Session<R> {
    ranging: R,
    monitor: FailureStreakMonitor,
    running: bool,
}

impl<R: Ranging> Session<R> {
    /// Creates a stopped session.
    pub fn new(ranging: R, monitor: FailureStreakMonitor) -> Self {
        Self {
            ranging,
            monitor,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.monitor.reset();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs one measurement if the session is running.
    pub fn cycle(&mut self) -> Option<Cycle> {
        if !self.running {
            return None;
        }
        let outcome = self.ranging.measure();
        let notification = self.monitor.record(&outcome);
        Some(Cycle {
            outcome,
            notification,
        })
    }

    pub fn monitor(&self) -> &FailureStreakMonitor {
        &self.monitor
    }

    pub fn ranging(&self) -> &R {
        &self.ranging
    }
}
