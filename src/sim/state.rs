//! Game state and core simulation types
//!
//! One [`Session`] owns everything a running game mutates: the entity store,
//! score, lives, phase and RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::store::EntityStore;
use crate::tuning::Tuning;

/// Which screen the game presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Lives exhausted, final score shown
    GameOver,
}

/// The two falling object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallingKind {
    /// Caught for +1 score (heart)
    Collectible,
    /// Hit for -1 life (mud)
    Hazard,
}

impl FallingKind {
    pub const ALL: [FallingKind; 2] = [FallingKind::Collectible, FallingKind::Hazard];
}

/// Things that happened during one step, consumed by the host for feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Collected,
    Hit,
    GameOver { final_score: u32 },
}

/// The player's sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal units per frame while a key is held
    pub speed: f32,
}

impl Player {
    /// Player centred horizontally, a fixed offset above the arena bottom
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.arena_width / 2.0 - tuning.player_width / 2.0,
                tuning.arena_height - tuning.player_bottom_offset,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Shift horizontally, keeping `0 <= x <= arena_width - width`
    pub fn shift(&mut self, dx: f32, arena_width: f32) {
        self.pos.x = clamp_x(self.pos.x + dx, self.size.x, arena_width);
    }
}

/// Clamp a left edge so an entity of `width` stays inside the arena
#[inline]
pub fn clamp_x(x: f32, width: f32, arena_width: f32) -> f32 {
    x.clamp(0.0, (arena_width - width).max(0.0))
}

/// A falling heart or mud blob
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallingObject {
    pub kind: FallingKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Edge length of the square sprite
    pub size: f32,
    /// Downward units per frame, fixed at spawn
    pub speed: f32,
}

impl FallingObject {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }

    /// Advance one frame
    #[inline]
    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }
}

/// Complete game session: one per page, reset on every start
#[derive(Debug, Clone)]
pub struct Session {
    pub tuning: Tuning,
    pub store: EntityStore,
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    rng: Pcg32,
}

impl Session {
    /// Create an idle session with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let store = EntityStore::new(Player::spawn(&tuning));
        Self {
            lives: tuning.starting_lives,
            tuning,
            store,
            score: 0,
            phase: GamePhase::Idle,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Counters, collections and player back to their starting values
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.store.clear();
        self.store.player = Player::spawn(&self.tuning);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Apply a touch/pointer drag delta immediately (only while running)
    pub fn drag_player(&mut self, dx: f32) {
        if self.is_running() {
            self.store.player.shift(dx, self.tuning.arena_width);
        }
    }

    /// Scoreboard text
    pub fn status_line(&self) -> String {
        format!("Score: {} | Lives: {}", self.score, self.lives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(Tuning::default(), 1);
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.store.player.pos, Vec2::new(220.0, 520.0));
    }

    #[test]
    fn test_status_line() {
        let mut session = Session::new(Tuning::default(), 1);
        session.score = 7;
        session.lives = 2;
        assert_eq!(session.status_line(), "Score: 7 | Lives: 2");
    }

    #[test]
    fn test_drag_ignored_unless_running() {
        let mut session = Session::new(Tuning::default(), 1);
        let x = session.store.player.pos.x;
        session.drag_player(50.0);
        assert_eq!(session.store.player.pos.x, x);

        session.phase = GamePhase::Running;
        session.drag_player(50.0);
        assert_eq!(session.store.player.pos.x, x + 50.0);

        // Clamped immediately, not on the next step
        session.drag_player(10_000.0);
        assert_eq!(session.store.player.pos.x, 440.0);
        session.drag_player(-10_000.0);
        assert_eq!(session.store.player.pos.x, 0.0);
    }

    #[test]
    fn test_reset_restores_player_and_counters() {
        let mut session = Session::new(Tuning::default(), 1);
        session.phase = GamePhase::Running;
        session.score = 12;
        session.lives = 0;
        session.drag_player(-100.0);
        session.reset();
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.store.player, Player::spawn(&session.tuning));
    }
}
