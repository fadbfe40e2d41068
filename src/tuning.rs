//! Data-driven game balance
//!
//! Defaults mirror [`crate::consts`]. A host may override them with a JSON
//! document; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::FallingKind;

/// Errors from loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Per-kind falling object balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingTuning {
    /// Edge length of the square sprite
    pub size: f32,
    /// Minimum fall speed (units per frame)
    pub base_speed: f32,
    /// Extra speed drawn uniformly from `[0, speed_range)` at spawn time
    pub speed_range: f32,
    /// Spawn trigger period in milliseconds
    pub spawn_period_ms: u32,
}

impl FallingTuning {
    pub const COLLECTIBLE: Self = Self {
        size: COLLECTIBLE_SIZE,
        base_speed: COLLECTIBLE_BASE_SPEED,
        speed_range: COLLECTIBLE_SPEED_RANGE,
        spawn_period_ms: COLLECTIBLE_PERIOD_MS,
    };

    pub const HAZARD: Self = Self {
        size: HAZARD_SIZE,
        base_speed: HAZARD_BASE_SPEED,
        speed_range: HAZARD_SPEED_RANGE,
        spawn_period_ms: HAZARD_PERIOD_MS,
    };
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_offset: f32,
    pub player_speed: f32,
    pub starting_lives: u32,
    pub collectible: FallingTuning,
    pub hazard: FallingTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,
            collectible: FallingTuning::COLLECTIBLE,
            hazard: FallingTuning::HAZARD,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Balance for one falling kind
    pub fn falling(&self, kind: FallingKind) -> &FallingTuning {
        match kind {
            FallingKind::Collectible => &self.collectible,
            FallingKind::Hazard => &self.hazard,
        }
    }

    /// Reject values that would break arena bounds or the spawn timers
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> TuningError {
            TuningError::Invalid { field, reason }
        }
        // NaN fails both
        fn positive(v: f32) -> bool {
            v > 0.0
        }
        fn non_negative(v: f32) -> bool {
            v >= 0.0
        }

        if !positive(self.arena_width) {
            return Err(invalid("arena_width", "must be positive"));
        }
        if !positive(self.arena_height) {
            return Err(invalid("arena_height", "must be positive"));
        }
        if !positive(self.player_width) || !positive(self.player_height) {
            return Err(invalid("player_width/player_height", "must be positive"));
        }
        if self.player_width > self.arena_width {
            return Err(invalid("player_width", "wider than the arena"));
        }
        if !non_negative(self.player_speed) {
            return Err(invalid("player_speed", "must not be negative"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }

        for (field, falling) in [("collectible", &self.collectible), ("hazard", &self.hazard)] {
            if !positive(falling.size) {
                return Err(invalid(field, "size must be positive"));
            }
            if falling.size > self.arena_width {
                return Err(invalid(field, "size wider than the arena"));
            }
            if !non_negative(falling.base_speed) || !non_negative(falling.speed_range) {
                return Err(invalid(field, "speeds must not be negative"));
            }
            if falling.spawn_period_ms == 0 {
                return Err(invalid(field, "spawn period must be positive"));
            }
        }

        Ok(())
    }
}
