//! One-shot echo deadline
//!
//! The guard bounds how long a measurement can stay in progress. It hands out a
//! fresh [`AlarmHandle`] per measurement and asks the platform's [`DeadlineAlarm`]
//! to call [`expire`] with it once the deadline passes. Whether the expiry or the
//! falling edge wins is decided inside [`PulseTimer`], so a late expiry or a late
//! cancel is always harmless.

use crate::error::ArmError;
use crate::pulse_timer::PulseTimer;

/// Identifies one armed deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmHandle(u32);

impl AlarmHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Platform one-shot timer
///
/// Implementations call [`expire`] from their own (interrupt) context when a
/// scheduled deadline passes.
pub trait DeadlineAlarm {
    /// Schedules expiry of `handle` after `after_us` microseconds.
    fn schedule(&mut self, handle: AlarmHandle, after_us: u64);

    /// Stops a scheduled expiry. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: AlarmHandle);
}

/// Arms and cancels the per-measurement deadline
pub struct TimeoutGuard<A> {
    alarm: A,
    next_id: u32,
}

impl<A: DeadlineAlarm> TimeoutGuard<A> {
    pub fn new(alarm: A) -> Self {
        Self { alarm, next_id: 0 }
    }

    /// Marks `timer` in progress and schedules its deadline.
    ///
    /// Fails without side effects while a previous deadline is still live.
    pub fn arm(&mut self, timer: &PulseTimer, after_us: u64) -> Result<AlarmHandle, ArmError> {
        let handle = AlarmHandle::new(self.next_id);
        timer.begin(handle)?;
        self.next_id = self.next_id.wrapping_add(1);
        self.alarm.schedule(handle, after_us);
        Ok(handle)
    }

    /// Cancels the deadline returned by the falling edge; `None` is a no-op.
    pub fn cancel(&mut self, handle: Option<AlarmHandle>) {
        if let Some(handle) = handle {
            self.alarm.cancel(handle);
        }
    }

    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    pub fn alarm_mut(&mut self) -> &mut A {
        &mut self.alarm
    }
}

/// Expiry callback for a scheduled deadline.
///
/// Clears the in-progress flag, resets the window and releases the handle, all in
/// one critical section. Returns `false` if the echo already completed the
/// measurement, in which case nothing changes.
pub fn expire(timer: &PulseTimer, handle: AlarmHandle) -> bool {
    let fired = timer.expire(handle);
    if fired {
        debug!("echo deadline {:?} expired", handle.id());
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingAlarm {
        scheduled: Vec<(AlarmHandle, u64)>,
        cancelled: Vec<AlarmHandle>,
    }

    impl DeadlineAlarm for RecordingAlarm {
        fn schedule(&mut self, handle: AlarmHandle, after_us: u64) {
            self.scheduled.push((handle, after_us));
        }

        fn cancel(&mut self, handle: AlarmHandle) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn arm_schedules_a_fresh_handle_each_time() {
        let timer = PulseTimer::new();
        let mut guard = TimeoutGuard::new(RecordingAlarm::default());

        let first = guard.arm(&timer, 30_000).unwrap();
        guard.cancel(timer.on_falling_edge(10));
        let second = guard.arm(&timer, 30_000).unwrap();

        assert_ne!(first, second);
        assert_eq!(
            guard.alarm().scheduled,
            vec![(first, 30_000), (second, 30_000)]
        );
        assert_eq!(guard.alarm().cancelled, vec![first]);
    }

    #[test]
    fn arming_twice_is_refused_without_scheduling() {
        let timer = PulseTimer::new();
        let mut guard = TimeoutGuard::new(RecordingAlarm::default());

        let live = guard.arm(&timer, 30_000).unwrap();
        assert_eq!(
            guard.arm(&timer, 30_000),
            Err(ArmError::AlreadyArmed(live))
        );
        assert_eq!(guard.alarm().scheduled.len(), 1);
    }

    #[test]
    fn cancel_of_none_is_a_no_op() {
        let mut guard = TimeoutGuard::new(RecordingAlarm::default());
        guard.cancel(None);
        assert!(guard.alarm().cancelled.is_empty());
    }

    #[test]
    fn expiry_wins_then_edge_has_nothing_to_cancel() {
        let timer = PulseTimer::new();
        let mut guard = TimeoutGuard::new(RecordingAlarm::default());

        let handle = guard.arm(&timer, 30_000).unwrap();
        timer.on_rising_edge(100);
        assert!(expire(&timer, handle));

        guard.cancel(timer.on_falling_edge(30_200));
        assert!(guard.alarm().cancelled.is_empty());
        assert!(timer.window().is_unset());
    }

    #[test]
    fn expiry_is_fired_at_most_once() {
        let timer = PulseTimer::new();
        let mut guard = TimeoutGuard::new(RecordingAlarm::default());

        let handle = guard.arm(&timer, 30_000).unwrap();
        assert!(expire(&timer, handle));
        assert!(!expire(&timer, handle));
    }
}
