//! Platform abstraction layer
//!
//! The game talks to its host through four narrow collaborators:
//! - [`AssetReadiness`]: which sprites have finished loading
//! - [`Feedback`]: fire-and-forget cues (sounds) for catches and hits
//! - [`Display`]: scoreboard, screens and notices
//! - [`Renderer`]: draws the sprite list each frame
//!
//! `web` implements them against the DOM; tests use recording fakes.

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::Cell;
use std::rc::Rc;

use crate::renderer::Sprite;
use crate::sim::{FallingKind, GameEvent, GamePhase};

/// The three sprite images the game needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Player,
    Collectible,
    Hazard,
}

impl Asset {
    pub const ALL: [Asset; 3] = [Asset::Player, Asset::Collectible, Asset::Hazard];

    pub fn for_kind(kind: FallingKind) -> Self {
        match kind {
            FallingKind::Collectible => Asset::Collectible,
            FallingKind::Hazard => Asset::Hazard,
        }
    }

    /// Relative URL of the sprite image
    pub fn path(&self) -> &'static str {
        match self {
            Asset::Player => "assets/hello-kitty.png",
            Asset::Collectible => "assets/heart.png",
            Asset::Hazard => "assets/mud.png",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Asset::Player => 1,
            Asset::Collectible => 1 << 1,
            Asset::Hazard => 1 << 2,
        }
    }
}

pub trait AssetReadiness {
    fn is_loaded(&self, asset: Asset) -> bool;

    /// Gate for start/restart
    fn all_loaded(&self) -> bool {
        Asset::ALL.iter().all(|&asset| self.is_loaded(asset))
    }
}

pub trait Feedback {
    /// Must not block; failures are swallowed by the implementation
    fn on_event(&mut self, event: GameEvent);
}

pub trait Display {
    /// Scoreboard line, updated every step
    fn show_status(&mut self, status: &str);
    /// Show the screen for `phase`, hiding the others
    fn show_screen(&mut self, phase: GamePhase);
    fn show_final_score(&mut self, score: u32);
    /// Transient user-visible notice (start rejected, ...)
    fn notify(&mut self, notice: &str);
}

pub trait Renderer {
    fn draw(&mut self, sprites: &[Sprite]);
}

/// Everything the frame driver needs from its host
pub trait Host: AssetReadiness + Feedback + Display + Renderer {}

impl<T: AssetReadiness + Feedback + Display + Renderer> Host for T {}

/// Load-completion flags shared between image `onload` callbacks and the game.
///
/// Clones share the same flags.
#[derive(Debug, Clone, Default)]
pub struct AssetTracker {
    loaded: Rc<Cell<u8>>,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&self, asset: Asset) {
        self.loaded.set(self.loaded.get() | asset.bit());
        log::debug!("Asset loaded: {}", asset.path());
    }
}

impl AssetReadiness for AssetTracker {
    fn is_loaded(&self, asset: Asset) -> bool {
        self.loaded.get() & asset.bit() != 0
    }
}
