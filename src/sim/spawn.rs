//! Spawner: one falling object per trigger firing

use glam::Vec2;
use rand::Rng;

use super::state::{FallingKind, FallingObject, Session};

/// Roll a new object of `kind` just above the arena's top edge
pub fn roll_object<R: Rng + ?Sized>(
    rng: &mut R,
    kind: FallingKind,
    size: f32,
    base_speed: f32,
    speed_range: f32,
    arena_width: f32,
) -> FallingObject {
    let x = rng.random::<f32>() * (arena_width - size).max(0.0);
    let speed = base_speed + rng.random::<f32>() * speed_range;
    FallingObject {
        kind,
        pos: Vec2::new(x, -size),
        size,
        speed,
    }
}

/// Handle one spawn trigger firing.
///
/// No-op unless the session is running and the kind's sprite has loaded;
/// a skipped firing is dropped, not queued. Returns whether an object was
/// added.
pub fn spawn(session: &mut Session, kind: FallingKind, asset_ready: bool) -> bool {
    if !session.is_running() {
        return false;
    }
    if !asset_ready {
        log::debug!("Skipped {:?} spawn: sprite not loaded", kind);
        return false;
    }

    let falling = *session.tuning.falling(kind);
    let arena_width = session.tuning.arena_width;
    let object = roll_object(
        session.rng(),
        kind,
        falling.size,
        falling.base_speed,
        falling.speed_range,
        arena_width,
    );
    log::debug!(
        "Spawned {:?} at x={:.1} speed={:.2}",
        kind,
        object.pos.x,
        object.speed
    );
    session.store.add(object);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_session() -> Session {
        let mut session = Session::new(Tuning::default(), 42);
        session.phase = GamePhase::Running;
        session
    }

    #[test]
    fn test_spawn_appends_above_arena() {
        let mut session = running_session();
        assert!(spawn(&mut session, FallingKind::Collectible, true));
        assert!(spawn(&mut session, FallingKind::Hazard, true));

        let heart = session.store.collection(FallingKind::Collectible)[0];
        assert_eq!(heart.pos.y, -30.0);
        assert_eq!(heart.size, 30.0);
        assert!((2.0..4.0).contains(&heart.speed));

        let mud = session.store.collection(FallingKind::Hazard)[0];
        assert_eq!(mud.pos.y, -40.0);
        assert_eq!(mud.size, 40.0);
        assert!((2.0..5.0).contains(&mud.speed));
    }

    #[test]
    fn test_spawn_skipped_when_asset_missing() {
        let mut session = running_session();
        assert!(!spawn(&mut session, FallingKind::Hazard, false));
        assert!(session.store.is_empty());
    }

    #[test]
    fn test_spawn_skipped_unless_running() {
        let mut session = Session::new(Tuning::default(), 42);
        assert!(!spawn(&mut session, FallingKind::Collectible, true));
        session.phase = GamePhase::GameOver;
        assert!(!spawn(&mut session, FallingKind::Collectible, true));
        assert!(session.store.is_empty());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = running_session();
        let mut b = running_session();
        for _ in 0..10 {
            spawn(&mut a, FallingKind::Collectible, true);
            spawn(&mut b, FallingKind::Collectible, true);
        }
        assert_eq!(
            a.store.collection(FallingKind::Collectible),
            b.store.collection(FallingKind::Collectible)
        );
    }

    proptest! {
        #[test]
        fn prop_rolled_object_within_bounds(seed in any::<u64>(), size in 1.0f32..200.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let object = roll_object(&mut rng, FallingKind::Hazard, size, 2.0, 3.0, 500.0);
            prop_assert!(object.pos.x >= 0.0);
            prop_assert!(object.pos.x <= 500.0 - size);
            prop_assert!(object.speed >= 2.0 && object.speed <= 5.0);
            prop_assert_eq!(object.pos.y, -size);
        }
    }
}
