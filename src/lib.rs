//! Heart Catcher - a falling-object catch game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game phases)
//! - `scheduler`: Periodic timers and frame requests behind one abstraction
//! - `driver`: Frame driver tying the simulation to its host
//! - `platform`: Collaborator traits (assets, display, feedback, input)
//! - `renderer`: Sprite list, responsive canvas layout, 2D canvas drawing
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod driver;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod sim;
pub mod tuning;

pub use driver::{FrameStatus, Game};
pub use scheduler::{ManualScheduler, Scheduler, TimerId};
pub use tuning::{FallingTuning, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (logical units, independent of display scaling)
    pub const ARENA_WIDTH: f32 = 500.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player sprite
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Distance from the arena bottom to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 80.0;
    /// Horizontal units per frame while a direction key is held
    pub const PLAYER_SPEED: f32 = 5.0;

    pub const STARTING_LIVES: u32 = 3;

    /// Collectible (heart) defaults
    pub const COLLECTIBLE_SIZE: f32 = 30.0;
    pub const COLLECTIBLE_BASE_SPEED: f32 = 2.0;
    pub const COLLECTIBLE_SPEED_RANGE: f32 = 2.0;
    pub const COLLECTIBLE_PERIOD_MS: u32 = 1500;

    /// Hazard (mud) defaults
    pub const HAZARD_SIZE: f32 = 40.0;
    pub const HAZARD_BASE_SPEED: f32 = 2.0;
    pub const HAZARD_SPEED_RANGE: f32 = 3.0;
    pub const HAZARD_PERIOD_MS: u32 = 2500;

    /// Shown when start/restart is pressed before every image has loaded
    pub const ASSETS_LOADING_NOTICE: &str = "Loading assets… please wait!";
}
