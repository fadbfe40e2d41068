//! Rendering module
//!
//! `scene` turns a session into a sprite list, `viewport` sizes the canvas,
//! and `canvas` draws the list with the 2D canvas API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod viewport;

pub use scene::{Sprite, build_scene};
pub use viewport::{CanvasLayout, fit_canvas};
