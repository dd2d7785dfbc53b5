//! Association between generated walls and the descriptors they came from.

use crate::model::WallId;
use crate::parser::DescriptorRef;
use slotmap::SecondaryMap;

/// Wall to descriptor map, rebuilt with every building.
#[derive(Debug, Default, Clone)]
pub struct ProjectionLookup {
    by_wall: SecondaryMap<WallId, DescriptorRef>,
}

impl ProjectionLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, wall: WallId, source: DescriptorRef) {
        self.by_wall.insert(wall, source);
    }

    /// The descriptor a wall was generated from.
    #[must_use]
    pub fn lookup(&self, wall: WallId) -> Option<DescriptorRef> {
        let found = self.by_wall.get(wall).copied();
        if found.is_none() {
            tracing::trace!(?wall, "Wall has no descriptor");
        }
        found
    }

    /// The wall generated from a descriptor, by linear scan.
    #[must_use]
    pub fn find_wall(&self, source: &DescriptorRef) -> Option<WallId> {
        self.by_wall
            .iter()
            .find(|(_, s)| *s == source)
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_wall.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_wall.is_empty()
    }
}
