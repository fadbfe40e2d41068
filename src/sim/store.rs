//! Entity store: the player plus one ordered collection per falling kind

use super::state::{FallingKind, FallingObject, Player};

#[derive(Debug, Clone)]
pub struct EntityStore {
    pub player: Player,
    collectibles: Vec<FallingObject>,
    hazards: Vec<FallingObject>,
}

impl EntityStore {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            collectibles: Vec::new(),
            hazards: Vec::new(),
        }
    }

    /// Append an object to its kind's collection
    pub fn add(&mut self, object: FallingObject) {
        self.collection_mut(object.kind).push(object);
    }

    /// Remove by index, preserving the order of the remaining objects
    pub fn remove_at(&mut self, kind: FallingKind, index: usize) -> Option<FallingObject> {
        let objects = self.collection_mut(kind);
        (index < objects.len()).then(|| objects.remove(index))
    }

    pub fn iter(&self, kind: FallingKind) -> std::slice::Iter<'_, FallingObject> {
        self.collection(kind).iter()
    }

    pub fn len(&self, kind: FallingKind) -> usize {
        self.collection(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectibles.is_empty() && self.hazards.is_empty()
    }

    /// Drop every falling object (the player is kept)
    pub fn clear(&mut self) {
        self.collectibles.clear();
        self.hazards.clear();
    }

    pub fn collection(&self, kind: FallingKind) -> &[FallingObject] {
        match kind {
            FallingKind::Collectible => &self.collectibles,
            FallingKind::Hazard => &self.hazards,
        }
    }

    pub(crate) fn collection_mut(&mut self, kind: FallingKind) -> &mut Vec<FallingObject> {
        match kind {
            FallingKind::Collectible => &mut self.collectibles,
            FallingKind::Hazard => &mut self.hazards,
        }
    }
}
