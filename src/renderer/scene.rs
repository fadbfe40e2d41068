//! Per-frame sprite list

use glam::Vec2;

use crate::platform::{Asset, AssetReadiness};
use crate::sim::{FallingKind, Session};

/// One image to draw, in arena units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub asset: Asset,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Player first, then collectibles, then hazards. Sprites whose image has
/// not loaded are left out.
pub fn build_scene(session: &Session, assets: &impl AssetReadiness) -> Vec<Sprite> {
    let falling: usize = FallingKind::ALL.iter().map(|&k| session.store.len(k)).sum();
    let mut sprites = Vec::with_capacity(1 + falling);

    if assets.is_loaded(Asset::Player) {
        let player = &session.store.player;
        sprites.push(Sprite {
            asset: Asset::Player,
            pos: player.pos,
            size: player.size,
        });
    }

    for kind in FallingKind::ALL {
        let asset = Asset::for_kind(kind);
        if !assets.is_loaded(asset) {
            continue;
        }
        sprites.extend(session.store.iter(kind).map(|object| Sprite {
            asset,
            pos: object.pos,
            size: Vec2::splat(object.size),
        }));
    }

    sprites
}
