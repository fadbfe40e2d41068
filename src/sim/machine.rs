//! Game phase transitions: Idle → Running → GameOver → Running
//!
//! Entering Running resets the session, arms both spawn triggers and asks
//! for the first frame. Entering GameOver disarms the triggers; the frame
//! driver stops on its own because it only reschedules while running.

use thiserror::Error;

use super::state::{FallingKind, GamePhase, Session};
use crate::scheduler::{Scheduler, TimerId};

/// Why a start/restart request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("assets are still loading")]
    AssetsNotReady,
    #[error("a game is already running")]
    AlreadyRunning,
}

/// Handles of the two armed spawn triggers
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpawnTimers {
    collectible: Option<TimerId>,
    hazard: Option<TimerId>,
}

impl SpawnTimers {
    pub fn is_armed(&self) -> bool {
        self.collectible.is_some() || self.hazard.is_some()
    }

    fn slot(&mut self, kind: FallingKind) -> &mut Option<TimerId> {
        match kind {
            FallingKind::Collectible => &mut self.collectible,
            FallingKind::Hazard => &mut self.hazard,
        }
    }

    /// Arm one trigger per kind. Any previously armed trigger is cancelled
    /// first so repeated starts never stack timers.
    pub fn arm<S: Scheduler + ?Sized>(&mut self, session: &Session, scheduler: &mut S) {
        self.disarm(scheduler);
        for kind in FallingKind::ALL {
            let period = session.tuning.falling(kind).spawn_period_ms;
            *self.slot(kind) = Some(scheduler.schedule_periodic(kind, period));
        }
    }

    /// Cancel both triggers. Safe to call any number of times.
    pub fn disarm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        for kind in FallingKind::ALL {
            if let Some(id) = self.slot(kind).take() {
                scheduler.cancel(id);
            }
        }
    }
}

/// Start or restart a game.
///
/// Rejected without any state change when the sprites have not all loaded
/// or when a game is already running.
pub fn start<S: Scheduler + ?Sized>(
    session: &mut Session,
    timers: &mut SpawnTimers,
    scheduler: &mut S,
    assets_ready: bool,
) -> Result<(), StartError> {
    if !assets_ready {
        log::info!("Start rejected: assets still loading");
        return Err(StartError::AssetsNotReady);
    }
    if session.is_running() {
        return Err(StartError::AlreadyRunning);
    }

    session.reset();
    session.phase = GamePhase::Running;
    timers.arm(session, scheduler);
    scheduler.request_frame();

    log::info!("Game started with {} lives", session.lives);
    Ok(())
}

/// Enter GameOver and disarm the spawn triggers.
///
/// The step already flips the phase when lives run out; calling this again
/// afterwards is harmless.
pub fn end<S: Scheduler + ?Sized>(session: &mut Session, timers: &mut SpawnTimers, scheduler: &mut S) {
    session.phase = GamePhase::GameOver;
    timers.disarm(scheduler);
    log::info!("Game over, final score {}", session.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::sim::state::FallingObject;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn setup() -> (Session, SpawnTimers, ManualScheduler) {
        (
            Session::new(Tuning::default(), 3),
            SpawnTimers::default(),
            ManualScheduler::new(),
        )
    }

    #[test]
    fn test_start_arms_timers_and_frame() {
        let (mut session, mut timers, mut sched) = setup();
        start(&mut session, &mut timers, &mut sched, true).unwrap();
        assert_eq!(session.phase, GamePhase::Running);
        assert!(timers.is_armed());
        assert_eq!(sched.active_timers(), 2);
        assert!(sched.take_frame_request());
    }

    #[test]
    fn test_start_rejected_while_loading() {
        let (mut session, mut timers, mut sched) = setup();
        let err = start(&mut session, &mut timers, &mut sched, false).unwrap_err();
        assert_eq!(err, StartError::AssetsNotReady);
        assert_eq!(session.phase, GamePhase::Idle);
        assert!(!timers.is_armed());
        assert_eq!(sched.active_timers(), 0);
        assert!(!sched.frame_requested());
    }

    #[test]
    fn test_start_rejected_while_running() {
        let (mut session, mut timers, mut sched) = setup();
        start(&mut session, &mut timers, &mut sched, true).unwrap();
        session.score = 4;
        let err = start(&mut session, &mut timers, &mut sched, true).unwrap_err();
        assert_eq!(err, StartError::AlreadyRunning);
        assert_eq!(session.score, 4);
        assert_eq!(sched.active_timers(), 2);
    }

    #[test]
    fn test_restart_after_game_over_resets() {
        let (mut session, mut timers, mut sched) = setup();
        start(&mut session, &mut timers, &mut sched, true).unwrap();
        session.score = 9;
        session.lives = 0;
        session.store.add(FallingObject {
            kind: FallingKind::Hazard,
            pos: Vec2::ZERO,
            size: 40.0,
            speed: 2.0,
        });
        end(&mut session, &mut timers, &mut sched);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(sched.active_timers(), 0);

        start(&mut session, &mut timers, &mut sched, true).unwrap();
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert!(session.store.is_empty());
        assert_eq!(sched.active_timers(), 2);
    }

    #[test]
    fn test_disarm_is_idempotent() {
        let (mut session, mut timers, mut sched) = setup();
        start(&mut session, &mut timers, &mut sched, true).unwrap();
        timers.disarm(&mut sched);
        timers.disarm(&mut sched);
        assert!(!timers.is_armed());
        assert_eq!(sched.active_timers(), 0);
    }

    #[test]
    fn test_repeated_cycles_never_stack_timers() {
        let (mut session, mut timers, mut sched) = setup();
        for _ in 0..5 {
            start(&mut session, &mut timers, &mut sched, true).unwrap();
            assert_eq!(sched.active_timers(), 2);
            end(&mut session, &mut timers, &mut sched);
            assert_eq!(sched.active_timers(), 0);
        }
    }
}
