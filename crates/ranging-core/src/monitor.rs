//! Failure streak alarm
//!
//! Single failed readings are common (soft targets, steep angles), so the sensor is
//! only reported as disconnected after [`FAILURE_THRESHOLD`] failures in a row.
//!
//! # State Machine
//! ```text
//!          failure, count < threshold
//!          success (count = 0)
//!         +-----+
//!         |     v     failure, count reaches threshold
//!        Normal ----------------------------------> Alarmed ---+
//!         ^                (AlarmRaised)             |   ^      | failure
//!         |                                          |   +------+ (silent)
//!         +------------------------------------------+
//!                      success (Recovered)
//! ```
//!
//! Only the two edges produce a [`Notification`], so a dead sensor does not flood
//! the log.

use crate::config::FAILURE_THRESHOLD;
use crate::ranging::RangingOutcome;

/// Alarm transition worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// Failure streak reached the threshold
    AlarmRaised,
    /// First successful reading after an alarm
    Recovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreakState {
    Normal,
    Alarmed,
}

/// Debounces ranging failures into an alarm
#[derive(Debug, Clone)]
pub struct FailureStreakMonitor {
    threshold: u32,
    consecutive_failures: u32,
    state: StreakState,
}

impl Default for FailureStreakMonitor {
    fn default() -> Self {
        Self::new(FAILURE_THRESHOLD)
    }
}

impl FailureStreakMonitor {
    /// A threshold of zero is treated as one.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive_failures: 0,
            state: StreakState::Normal,
        }
    }

    /// Feeds one outcome and returns the transition it caused, if any.
    pub fn record(&mut self, outcome: &RangingOutcome) -> Option<Notification> {
        if outcome.is_success() {
            self.consecutive_failures = 0;
            return match self.state {
                StreakState::Alarmed => {
                    self.state = StreakState::Normal;
                    Some(Notification::Recovered)
                }
                StreakState::Normal => None,
            };
        }

        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        match self.state {
            StreakState::Normal if self.consecutive_failures >= self.threshold => {
                self.state = StreakState::Alarmed;
                Some(Notification::AlarmRaised)
            }
            _ => None,
        }
    }

    /// Back to Normal with a clean count, without notifying.
    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
        self.state = StreakState::Normal;
    }

    pub fn state(&self) -> StreakState {
        self.state
    }

    pub fn is_alarmed(&self) -> bool {
        self.state == StreakState::Alarmed
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranging::FailureReason;

    const FAIL: RangingOutcome = RangingOutcome::Failure(FailureReason::Timeout);
    const OK: RangingOutcome = RangingOutcome::Distance(42.0);

    fn feed(
        monitor: &mut FailureStreakMonitor,
        outcomes: &[RangingOutcome],
    ) -> Vec<Option<Notification>> {
        outcomes.iter().map(|o| monitor.record(o)).collect()
    }

    #[test]
    fn starts_normal() {
        let monitor = FailureStreakMonitor::default();
        assert_eq!(monitor.state(), StreakState::Normal);
        assert_eq!(monitor.consecutive_failures(), 0);
        assert_eq!(monitor.threshold(), 3);
    }

    #[test]
    fn fewer_failures_than_threshold_stay_silent() {
        let mut monitor = FailureStreakMonitor::default();
        assert_eq!(feed(&mut monitor, &[FAIL, FAIL]), vec![None, None]);
        assert_eq!(monitor.state(), StreakState::Normal);
        assert_eq!(monitor.consecutive_failures(), 2);
    }

    #[test]
    fn third_failure_raises_then_success_recovers() {
        let mut monitor = FailureStreakMonitor::default();
        let notes = feed(&mut monitor, &[FAIL, FAIL, FAIL, OK]);

        assert_eq!(
            notes,
            vec![
                None,
                None,
                Some(Notification::AlarmRaised),
                Some(Notification::Recovered)
            ]
        );
        assert_eq!(monitor.state(), StreakState::Normal);
        assert_eq!(monitor.consecutive_failures(), 0);
    }

    #[test]
    fn alarm_is_not_repeated_while_failing() {
        let mut monitor = FailureStreakMonitor::default();
        feed(&mut monitor, &[FAIL, FAIL, FAIL]);

        assert_eq!(feed(&mut monitor, &[FAIL; 10]), vec![None; 10]);
        assert!(monitor.is_alarmed());
        assert_eq!(monitor.consecutive_failures(), 13);
    }

    #[test]
    fn successes_while_normal_are_silent() {
        let mut monitor = FailureStreakMonitor::default();
        assert_eq!(feed(&mut monitor, &[OK, OK, FAIL, OK, OK]), vec![None; 5]);
    }

    #[test]
    fn success_breaks_the_streak() {
        let mut monitor = FailureStreakMonitor::default();
        let notes = feed(&mut monitor, &[FAIL, FAIL, OK, FAIL, FAIL]);

        assert_eq!(notes, vec![None; 5]);
        assert_eq!(monitor.state(), StreakState::Normal);
    }

    #[test]
    fn both_failure_reasons_count() {
        let mut monitor = FailureStreakMonitor::default();
        let edge = RangingOutcome::Failure(FailureReason::InvalidEdgeOrder);
        let notes = feed(&mut monitor, &[edge, FAIL, edge]);
        assert_eq!(notes[2], Some(Notification::AlarmRaised));
    }

    #[test]
    fn reset_clears_alarm_without_notifying() {
        let mut monitor = FailureStreakMonitor::default();
        feed(&mut monitor, &[FAIL, FAIL, FAIL]);

        monitor.reset();
        assert_eq!(monitor.state(), StreakState::Normal);
        assert_eq!(monitor.record(&OK), None);
    }

    #[test]
    fn zero_threshold_alarms_on_first_failure() {
        let mut monitor = FailureStreakMonitor::new(0);
        assert_eq!(monitor.record(&FAIL), Some(Notification::AlarmRaised));
    }
}
