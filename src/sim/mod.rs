//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, speeds in units per frame
//! - Seeded RNG only
//! - Stable iteration order within a step
//! - No rendering or platform dependencies

pub mod collision;
pub mod machine;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::Rect;
pub use machine::{SpawnTimers, StartError, end, start};
pub use spawn::spawn;
pub use state::{FallingKind, FallingObject, GameEvent, GamePhase, Player, Session, clamp_x};
pub use store::EntityStore;
pub use tick::{TickInput, step};
