//! Timer and frame scheduling
//!
//! The game never holds raw interval handles or animation-frame callbacks.
//! It asks a [`Scheduler`] for periodic spawn triggers and next-frame
//! wakeups, and cancels triggers through the returned [`TimerId`]. The
//! browser implementation lives in `platform::web`; [`ManualScheduler`]
//! drives the same calls from an explicit clock for the native build and
//! tests.

use crate::sim::FallingKind;

/// Handle to a periodic trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

pub trait Scheduler {
    /// Fire a spawn trigger for `kind` every `period_ms` until cancelled
    fn schedule_periodic(&mut self, kind: FallingKind, period_ms: u32) -> TimerId;

    /// Ask for one frame callback on the next display refresh
    fn request_frame(&mut self);

    /// Stop a periodic trigger. Unknown or already cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Wakeups produced by [`ManualScheduler::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    Spawn(FallingKind),
    Frame,
}

#[derive(Debug, Clone)]
struct PeriodicTimer {
    id: TimerId,
    kind: FallingKind,
    period_ms: u64,
    next_due_ms: u64,
}

/// Deterministic scheduler driven by an explicit millisecond clock
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    timers: Vec<PeriodicTimer>,
    frame_requested: bool,
    next_id: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of periodic triggers still armed
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Consume a pending frame request
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Move the clock forward and return every spawn trigger that came due,
    /// in firing order. Triggers due at the same instant fire in the order
    /// they were scheduled.
    pub fn advance(&mut self, ms: u64) -> Vec<Wakeup> {
        let target = self.now_ms + ms;
        let mut fired = Vec::new();

        loop {
            let Some(timer) = self
                .timers
                .iter_mut()
                .filter(|t| t.next_due_ms <= target)
                .min_by_key(|t| (t.next_due_ms, t.id))
            else {
                break;
            };
            self.now_ms = timer.next_due_ms;
            timer.next_due_ms += timer.period_ms;
            fired.push(Wakeup::Spawn(timer.kind));
        }

        self.now_ms = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_periodic(&mut self, kind: FallingKind, period_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let period_ms = u64::from(period_ms.max(1));
        self.timers.push(PeriodicTimer {
            id,
            kind,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
        });
        id
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_firing_order() {
        let mut sched = ManualScheduler::new();
        sched.schedule_periodic(FallingKind::Collectible, 1500);
        sched.schedule_periodic(FallingKind::Hazard, 2500);

        let fired = sched.advance(5000);
        assert_eq!(
            fired,
            vec![
                Wakeup::Spawn(FallingKind::Collectible), // 1500
                Wakeup::Spawn(FallingKind::Hazard),      // 2500
                Wakeup::Spawn(FallingKind::Collectible), // 3000
                Wakeup::Spawn(FallingKind::Collectible), // 4500
                Wakeup::Spawn(FallingKind::Hazard),      // 5000
            ]
        );
        assert_eq!(sched.now_ms(), 5000);
    }

    #[test]
    fn test_partial_advance_keeps_phase() {
        let mut sched = ManualScheduler::new();
        sched.schedule_periodic(FallingKind::Collectible, 1500);
        assert!(sched.advance(1000).is_empty());
        assert_eq!(sched.advance(500), vec![Wakeup::Spawn(FallingKind::Collectible)]);
    }

    #[test]
    fn test_cancel_twice_is_harmless() {
        let mut sched = ManualScheduler::new();
        let id = sched.schedule_periodic(FallingKind::Hazard, 2500);
        assert!(sched.is_active(id));
        sched.cancel(id);
        sched.cancel(id);
        assert_eq!(sched.active_timers(), 0);
        assert!(sched.advance(10_000).is_empty());
    }

    #[test]
    fn test_frame_request_consumed_once() {
        let mut sched = ManualScheduler::new();
        assert!(!sched.take_frame_request());
        sched.request_frame();
        sched.request_frame();
        assert!(sched.frame_requested());
        assert!(sched.take_frame_request());
        assert!(!sched.take_frame_request());
    }
}
