//! Per-frame physics and collision step
//!
//! Moves the player, drops every falling object, resolves catches and hits,
//! and ends the game once lives run out.

use super::state::{FallingKind, GameEvent, GamePhase, Session};

/// Held movement keys for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// -1, 0 or +1
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the session by one frame.
///
/// Does nothing unless running. Events are returned in the order they
/// happened so the host can fire feedback cues.
pub fn step(session: &mut Session, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !session.is_running() {
        return events;
    }

    let arena_width = session.tuning.arena_width;
    let player = &mut session.store.player;
    let dx = input.direction() * player.speed;
    if dx != 0.0 {
        player.shift(dx, arena_width);
    }

    for kind in FallingKind::ALL {
        advance_kind(session, kind, &mut events);
    }

    if session.lives == 0 {
        session.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver {
            final_score: session.score,
        });
    }

    events
}

/// Drop, cull and collide one collection. Iterates in reverse so removals
/// never shift an index that is still to be visited.
fn advance_kind(session: &mut Session, kind: FallingKind, events: &mut Vec<GameEvent>) {
    let arena_height = session.tuning.arena_height;
    let player_rect = session.store.player.rect();

    let objects = session.store.collection_mut(kind);
    let mut collected = 0u32;
    let mut hits = 0u32;

    for i in (0..objects.len()).rev() {
        let object = &mut objects[i];
        object.fall();

        if object.pos.y > arena_height {
            objects.remove(i);
        } else if object.rect().overlaps(&player_rect) {
            objects.remove(i);
            match kind {
                FallingKind::Collectible => {
                    collected += 1;
                    events.push(GameEvent::Collected);
                }
                FallingKind::Hazard => {
                    hits += 1;
                    events.push(GameEvent::Hit);
                }
            }
        }
    }

    session.score = session.score.saturating_add(collected);
    session.lives = session.lives.saturating_sub(hits);
}
