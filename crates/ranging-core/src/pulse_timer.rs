//! Echo pulse capture
//!
//! [`PulseTimer`] is the only state shared between the edge/deadline handlers
//! (interrupt context) and the ranging loop (thread context). It holds the
//! measurement window, the in-progress flag and the handle of the live deadline in a
//! single critical-section cell, so every transition is atomic with respect to the
//! other context.
//!
//! # Resolution
//! A measurement is resolved exactly once, by whoever takes the live deadline handle
//! first:
//! - the falling edge takes it and hands it back for cancellation, or
//! - the deadline expiry takes it and resets the window.
//!
//! The loser finds no handle (or a different one) and leaves the state alone.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::error::ArmError;
use crate::timeout_guard::AlarmHandle;

/// Edge timestamps bounding one echo pulse, in microseconds of the monotonic clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementWindow {
    /// Rising edge of the echo
    pub start: Option<u64>,
    /// Falling edge of the echo
    pub end: Option<u64>,
}

impl MeasurementWindow {
    /// Window with neither edge recorded
    pub const UNSET: Self = Self {
        start: None,
        end: None,
    };

    pub fn is_unset(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Echo high time, if both edges are present and in order
    pub fn pulse_width_us(&self) -> Option<u64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end > start => Some(end - start),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Capture {
    window: MeasurementWindow,
    measuring: bool,
    deadline: Option<AlarmHandle>,
}

impl Capture {
    const IDLE: Self = Self {
        window: MeasurementWindow::UNSET,
        measuring: false,
        deadline: None,
    };
}

/// Interrupt-safe echo capture shared by the edge handlers and the ranging loop
pub struct PulseTimer {
    state: Mutex<CriticalSectionRawMutex, Cell<Capture>>,
}

impl Default for PulseTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseTimer {
    /// Creates an idle timer; `const` so it can back a `static`.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(Capture::IDLE)),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut Capture) -> R) -> R {
        self.state.lock(|cell| {
            let mut capture = cell.get();
            let result = f(&mut capture);
            cell.set(capture);
            result
        })
    }

    /// Records the rising edge of the echo.
    ///
    /// Edges outside a measurement are ignored.
    pub fn on_rising_edge(&self, at_us: u64) {
        self.update(|c| {
            if c.measuring {
                c.window.start = Some(at_us);
            }
        });
    }

    /// Records the falling edge and completes the measurement.
    ///
    /// Returns the deadline handle the caller must cancel, or `None` when the
    /// deadline already expired (or no measurement was running), in which case
    /// the edge is discarded.
    pub fn on_falling_edge(&self, at_us: u64) -> Option<AlarmHandle> {
        self.update(|c| {
            if !c.measuring {
                return None;
            }
            c.window.end = Some(at_us);
            c.measuring = false;
            c.deadline.take()
        })
    }

    /// True while the echo has neither fallen nor timed out
    pub fn is_measuring(&self) -> bool {
        self.update(|c| c.measuring)
    }

    /// Handle of the live deadline, if any
    pub fn pending_deadline(&self) -> Option<AlarmHandle> {
        self.update(|c| c.deadline)
    }

    /// Current window, without consuming it
    pub fn window(&self) -> MeasurementWindow {
        self.update(|c| c.window)
    }

    /// Reads the window and invalidates it in one step.
    pub fn take_window(&self) -> MeasurementWindow {
        self.update(|c| core::mem::take(&mut c.window))
    }

    /// Clears both timestamps at the start of a cycle.
    pub(crate) fn reset(&self) {
        self.update(|c| c.window = MeasurementWindow::UNSET);
    }

    /// Marks the measurement in progress under `handle`.
    pub(crate) fn begin(&self, handle: AlarmHandle) -> Result<(), ArmError> {
        self.update(|c| {
            if let Some(live) = c.deadline {
                return Err(ArmError::AlreadyArmed(live));
            }
            c.measuring = true;
            c.deadline = Some(handle);
            Ok(())
        })
    }

    /// Deadline expiry: stops the measurement and drops any half-captured edges.
    ///
    /// Returns `false` without touching the state when `handle` is no longer the live
    /// deadline, i.e. the falling edge already resolved the measurement.
    pub(crate) fn expire(&self, handle: AlarmHandle) -> bool {
        self.update(|c| {
            if c.deadline != Some(handle) {
                return false;
            }
            c.measuring = false;
            c.window = MeasurementWindow::UNSET;
            c.deadline = None;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(timer: &PulseTimer, id: u32) -> AlarmHandle {
        let handle = AlarmHandle::new(id);
        timer.reset();
        timer.begin(handle).unwrap();
        handle
    }

    #[test]
    fn records_both_edges_and_hands_back_deadline() {
        let timer = PulseTimer::new();
        let handle = armed(&timer, 1);

        timer.on_rising_edge(100);
        assert!(timer.is_measuring());
        assert_eq!(timer.on_falling_edge(1260), Some(handle));

        assert!(!timer.is_measuring());
        assert_eq!(timer.pending_deadline(), None);
        assert_eq!(timer.window().pulse_width_us(), Some(1160));
    }

    #[test]
    fn expiry_resets_window_and_clears_deadline() {
        let timer = PulseTimer::new();
        let handle = armed(&timer, 7);

        timer.on_rising_edge(100);
        assert!(timer.expire(handle));

        assert!(!timer.is_measuring());
        assert!(timer.window().is_unset());
        assert_eq!(timer.pending_deadline(), None);
    }

    #[test]
    fn expiry_after_falling_edge_is_a_no_op() {
        let timer = PulseTimer::new();
        let handle = armed(&timer, 2);

        timer.on_rising_edge(10);
        assert_eq!(timer.on_falling_edge(50), Some(handle));
        assert!(!timer.expire(handle));

        assert_eq!(timer.window().start, Some(10));
        assert_eq!(timer.window().end, Some(50));
    }

    #[test]
    fn falling_edge_after_expiry_is_discarded() {
        let timer = PulseTimer::new();
        let handle = armed(&timer, 3);

        timer.on_rising_edge(10);
        assert!(timer.expire(handle));
        assert_eq!(timer.on_falling_edge(40_000), None);
        timer.on_rising_edge(40_100);

        assert!(timer.window().is_unset());
    }

    #[test]
    fn stale_handle_does_not_expire_a_newer_measurement() {
        let timer = PulseTimer::new();
        let first = armed(&timer, 1);
        assert_eq!(timer.on_falling_edge(5), Some(first));

        let second = armed(&timer, 2);
        assert!(!timer.expire(first));
        assert!(timer.is_measuring());
        assert_eq!(timer.pending_deadline(), Some(second));
    }

    #[test]
    fn begin_refuses_a_second_live_deadline() {
        let timer = PulseTimer::new();
        let first = armed(&timer, 1);

        assert_eq!(
            timer.begin(AlarmHandle::new(2)),
            Err(ArmError::AlreadyArmed(first))
        );
        assert_eq!(timer.pending_deadline(), Some(first));
    }

    #[test]
    fn falling_edge_without_rising_edge_leaves_start_unset() {
        let timer = PulseTimer::new();
        armed(&timer, 1);

        assert!(timer.on_falling_edge(900).is_some());
        let window = timer.window();
        assert_eq!(window.start, None);
        assert_eq!(window.end, Some(900));
        assert_eq!(window.pulse_width_us(), None);
    }

    #[test]
    fn take_window_invalidates() {
        let timer = PulseTimer::new();
        armed(&timer, 1);
        timer.on_rising_edge(1);
        timer.on_falling_edge(2);

        assert_eq!(timer.take_window().pulse_width_us(), Some(1));
        assert!(timer.window().is_unset());
    }

    #[test]
    fn edges_while_idle_are_ignored() {
        let timer = PulseTimer::new();
        timer.on_rising_edge(1);
        assert_eq!(timer.on_falling_edge(2), None);
        assert!(timer.window().is_unset());
    }
}
