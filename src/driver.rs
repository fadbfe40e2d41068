//! Frame driver
//!
//! [`Game`] owns the session, the spawn trigger handles and the scheduler,
//! and is the single entry point for every host callback: button presses,
//! key and touch events, spawn timer firings and animation frames.

use crate::consts::ASSETS_LOADING_NOTICE;
use crate::platform::input::{DragTracker, HeldKeys};
use crate::platform::{Asset, AssetReadiness, Host};
use crate::renderer::build_scene;
use crate::scheduler::Scheduler;
use crate::sim::{self, FallingKind, GameEvent, GamePhase, Session, SpawnTimers, StartError};
use crate::tuning::Tuning;

/// Whether the driver asked for another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Stepped, rendered and rescheduled
    Continue,
    /// Not running; nothing rescheduled
    Halted,
}

pub struct Game<S: Scheduler> {
    session: Session,
    timers: SpawnTimers,
    scheduler: S,
    keys: HeldKeys,
    drag: DragTracker,
}

impl<S: Scheduler> Game<S> {
    pub fn new(tuning: Tuning, seed: u64, scheduler: S) -> Self {
        Self {
            session: Session::new(tuning, seed),
            timers: SpawnTimers::default(),
            scheduler,
            keys: HeldKeys::default(),
            drag: DragTracker::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Start/restart button. A rejection is reported to the player through
    /// the host and leaves everything untouched.
    pub fn start<H: Host>(&mut self, host: &mut H) -> Result<(), StartError> {
        let result = sim::start(
            &mut self.session,
            &mut self.timers,
            &mut self.scheduler,
            host.all_loaded(),
        );

        match result {
            Ok(()) => {
                host.show_screen(GamePhase::Running);
                host.show_status(&self.session.status_line());
            }
            Err(StartError::AssetsNotReady) => host.notify(ASSETS_LOADING_NOTICE),
            Err(StartError::AlreadyRunning) => log::debug!("Ignoring start: already running"),
        }
        result
    }

    /// Cancel both spawn triggers. Safe to call repeatedly.
    pub fn stop_spawning(&mut self) {
        self.timers.disarm(&mut self.scheduler);
    }

    pub fn spawn_timers(&self) -> &SpawnTimers {
        &self.timers
    }

    /// A spawn trigger fired
    pub fn on_spawn_timer<A: AssetReadiness + ?Sized>(&mut self, kind: FallingKind, assets: &A) -> bool {
        sim::spawn(&mut self.session, kind, assets.is_loaded(Asset::for_kind(kind)))
    }

    /// One animation frame: step, publish, render, reschedule while running
    pub fn frame<H: Host>(&mut self, host: &mut H) -> FrameStatus {
        if !self.session.is_running() {
            return FrameStatus::Halted;
        }

        let events = sim::step(&mut self.session, &self.keys.tick_input());
        for &event in &events {
            host.on_event(event);
        }
        host.show_status(&self.session.status_line());

        if let Some(&GameEvent::GameOver { final_score }) = events.last() {
            sim::end(&mut self.session, &mut self.timers, &mut self.scheduler);
            host.show_final_score(final_score);
            host.show_screen(GamePhase::GameOver);
        }

        let sprites = build_scene(&self.session, &*host);
        host.draw(&sprites);

        if self.session.is_running() {
            self.scheduler.request_frame();
            FrameStatus::Continue
        } else {
            FrameStatus::Halted
        }
    }

    /// keydown/keyup. Returns whether the key is one the game uses.
    pub fn key(&mut self, key: &str, down: bool) -> bool {
        self.keys.set(key, down)
    }

    pub fn touch_start(&mut self, arena_x: f32) {
        self.drag.begin(arena_x);
    }

    /// Moves the player immediately, clamped to the arena
    pub fn touch_move(&mut self, arena_x: f32) {
        if !self.session.is_running() {
            return;
        }
        if let Some(dx) = self.drag.move_to(arena_x) {
            self.session.drag_player(dx);
        }
    }

    pub fn touch_end(&mut self) {
        self.drag.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{AssetTracker, Display, Feedback, Renderer};
    use crate::renderer::Sprite;
    use crate::scheduler::{ManualScheduler, Wakeup};
    use crate::sim::FallingObject;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingHost {
        assets: AssetTracker,
        events: Vec<GameEvent>,
        status: Vec<String>,
        screens: Vec<GamePhase>,
        final_scores: Vec<u32>,
        notices: Vec<String>,
        frames_drawn: usize,
        last_sprites: Vec<Sprite>,
    }

    impl RecordingHost {
        fn loaded() -> Self {
            let host = Self::default();
            for asset in Asset::ALL {
                host.assets.mark_loaded(asset);
            }
            host
        }
    }

    impl AssetReadiness for RecordingHost {
        fn is_loaded(&self, asset: Asset) -> bool {
            self.assets.is_loaded(asset)
        }
    }

    impl Feedback for RecordingHost {
        fn on_event(&mut self, event: GameEvent) {
            self.events.push(event);
        }
    }

    impl Display for RecordingHost {
        fn show_status(&mut self, status: &str) {
            self.status.push(status.to_string());
        }
        fn show_screen(&mut self, phase: GamePhase) {
            self.screens.push(phase);
        }
        fn show_final_score(&mut self, score: u32) {
            self.final_scores.push(score);
        }
        fn notify(&mut self, notice: &str) {
            self.notices.push(notice.to_string());
        }
    }

    impl Renderer for RecordingHost {
        fn draw(&mut self, sprites: &[Sprite]) {
            self.frames_drawn += 1;
            self.last_sprites = sprites.to_vec();
        }
    }

    fn game() -> Game<ManualScheduler> {
        Game::new(Tuning::default(), 11, ManualScheduler::new())
    }

    /// Run spawn timers and frames for `frames` refreshes at 60 Hz
    fn run_frames(game: &mut Game<ManualScheduler>, host: &mut RecordingHost, frames: usize) {
        for _ in 0..frames {
            for wakeup in game.scheduler_mut().advance(16) {
                if let Wakeup::Spawn(kind) = wakeup {
                    game.on_spawn_timer(kind, &host.assets);
                }
            }
            if game.scheduler_mut().take_frame_request() {
                game.frame(host);
            }
        }
    }

    #[test]
    fn test_start_rejected_until_loaded() {
        let mut game = game();
        let mut host = RecordingHost::default();
        host.assets.mark_loaded(Asset::Player);
        host.assets.mark_loaded(Asset::Collectible);

        assert_eq!(game.start(&mut host), Err(StartError::AssetsNotReady));
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(host.notices, vec![ASSETS_LOADING_NOTICE.to_string()]);
        assert_eq!(game.scheduler().active_timers(), 0);
        assert!(!game.scheduler().frame_requested());
        assert!(host.screens.is_empty());
    }

    #[test]
    fn test_start_shows_running_screen() {
        let mut game = game();
        let mut host = RecordingHost::loaded();
        game.start(&mut host).unwrap();
        assert_eq!(host.screens, vec![GamePhase::Running]);
        assert_eq!(host.status.last().unwrap(), "Score: 0 | Lives: 3");
        assert_eq!(game.scheduler().active_timers(), 2);
    }

    #[test]
    fn test_frame_halts_when_not_running() {
        let mut game = game();
        let mut host = RecordingHost::loaded();
        assert_eq!(game.frame(&mut host), FrameStatus::Halted);
        assert_eq!(host.frames_drawn, 0);
    }

    #[test]
    fn test_frames_spawn_and_render() {
        let mut game = game();
        let mut host = RecordingHost::loaded();
        game.start(&mut host).unwrap();

        // 1.6s: one collectible spawned
        run_frames(&mut game, &mut host, 100);
        assert_eq!(game.session().store.len(FallingKind::Collectible), 1);
        assert_eq!(game.session().store.len(FallingKind::Hazard), 0);
        assert_eq!(host.frames_drawn, 100);
        assert!(host.last_sprites.iter().any(|s| s.asset == Asset::Collectible));
        assert!(game.scheduler().frame_requested());
    }

    #[test]
    fn test_spawn_skipped_for_unloaded_sprite() {
        let mut game = game();
        let mut host = RecordingHost::loaded();
        game.start(&mut host).unwrap();
        let partial = AssetTracker::new();
        partial.mark_loaded(Asset::Collectible);

        assert!(!game.on_spawn_timer(FallingKind::Hazard, &partial));
        assert!(game.on_spawn_timer(FallingKind::Collectible, &partial));
        assert_eq!(game.session().store.len(FallingKind::Hazard), 0);
        assert_eq!(game.session().store.len(FallingKind::Collectible), 1);
    }

    #[test]
    fn test_game_over_stops_timers_and_loop() {
        let mut game = game();
        let mut host = RecordingHost::loaded();
        game.start(&mut host).unwrap();
        assert!(game.scheduler_mut().take_frame_request());

        let player = game.session().store.player.pos;
        let session = game.session_mut();
        session.score = 6;
        session.lives = 1;
        session.store.add(FallingObject {
            kind: FallingKind::Hazard,
            pos: player,
            size: 40.0,
            speed: 0.0,
        });

        assert_eq!(game.frame(&mut host), FrameStatus::Halted);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.scheduler().active_timers(), 0);
        assert!(!game.scheduler().frame_requested());
        assert_eq!(host.final_scores, vec![6]);
        assert_eq!(host.screens.last(), Some(&GamePhase::GameOver));
        assert_eq!(
            host.events,
            vec![GameEvent::Hit, GameEvent::GameOver { final_score: 6 }]
        );
        assert_eq!(host.status.last().unwrap(), "Score: 6 | Lives: 0");
        // Final frame still rendered
        assert_eq!(host.frames_drawn, 1);

        // Restart resets everything
        game.start(&mut host).unwrap();
        assert_eq!(game.session().score, 0);
        assert_eq!(game.session().lives, 3);
        assert!(game.session().store.is_empty());
        assert_eq!(game.scheduler().active_timers(), 2);
    }

    #[test]
    fn test_stop_spawning_twice() {
        let mut game = game();
        let mut host = RecordingHost::loaded();
        game.start(&mut host).unwrap();
        game.stop_spawning();
        game.stop_spawning();
        assert!(!game.spawn_timers().is_armed());
        assert_eq!(game.scheduler().active_timers(), 0);
    }

    #[test]
    fn test_touch_drag_moves_player() {
        let mut game = game();
        let mut host = RecordingHost::loaded();

        // Ignored while idle
        game.touch_start(100.0);
        game.touch_move(150.0);
        assert_eq!(game.session().store.player.pos.x, 220.0);

        game.start(&mut host).unwrap();
        game.touch_start(100.0);
        game.touch_move(130.0);
        assert_eq!(game.session().store.player.pos.x, 250.0);
        game.touch_move(1000.0);
        assert_eq!(game.session().store.player.pos.x, 440.0);

        game.touch_end();
        game.touch_move(0.0);
        assert_eq!(game.session().store.player.pos.x, 440.0);
    }

    #[test]
    fn test_held_key_moves_each_frame() {
        let mut game = game();
        let mut host = RecordingHost::loaded();
        game.start(&mut host).unwrap();
        assert!(game.key("ArrowLeft", true));
        game.frame(&mut host);
        game.frame(&mut host);
        assert_eq!(game.session().store.player.pos, Vec2::new(210.0, 520.0));
        game.key("ArrowLeft", false);
        game.frame(&mut host);
        assert_eq!(game.session().store.player.pos.x, 210.0);
    }

    #[test]
    fn test_held_key_survives_restart() {
        let mut game = game();
        let mut host = RecordingHost::loaded();
        game.start(&mut host).unwrap();
        game.key("ArrowRight", true);

        let player = game.session().store.player.pos;
        let session = game.session_mut();
        session.lives = 1;
        session.store.add(FallingObject {
            kind: FallingKind::Hazard,
            pos: player,
            size: 40.0,
            speed: 0.0,
        });
        assert_eq!(game.frame(&mut host), FrameStatus::Halted);

        // Key never released, so the new game moves right straight away
        game.start(&mut host).unwrap();
        game.frame(&mut host);
        assert_eq!(game.session().store.player.pos, Vec2::new(225.0, 520.0));
    }
}
