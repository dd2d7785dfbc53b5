use crate::geometry::scale::{LengthUnit, Scale};
use crate::model::floor::Floor;
use crate::model::wall::{Wall, WallDraft, WallId};
use serde::Serialize;
use slotmap::SlotMap;

/// The generated scene: floors in level order and the walls they own.
///
/// Walls live in an arena keyed by [`WallId`]; each floor keeps the ids of
/// its walls in build order. Built once per descriptor and never mutated
/// afterwards.
#[derive(Debug, Serialize)]
pub struct Building {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub scale: Scale,
    pub stylesheet: String,
    pub floors: Vec<Floor>,
    #[serde(skip)]
    walls: SlotMap<WallId, Wall>,
}

impl Building {
    #[must_use]
    pub fn new(name: String, width: f64, height: f64, depth: f64, scale: Scale) -> Self {
        Self {
            name,
            width,
            height,
            depth,
            scale,
            stylesheet: String::new(),
            floors: Vec::new(),
            walls: SlotMap::with_key(),
        }
    }

    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.scale.unit
    }

    /// Appends a floor and returns its level index.
    pub fn add_floor(&mut self, origin: (f64, f64, f64), width: f64, depth: f64, name: String) -> usize {
        let level = self.floors.len();
        self.floors
            .push(Floor::new(level, name, origin, width, depth, self.depth));
        level
    }

    /// Freezes a draft into a wall owned by its floor.
    pub fn insert_wall(&mut self, draft: WallDraft) -> WallId {
        let floor = draft.floor;
        let id = self.walls.insert_with_key(|id| draft.finish(id));
        if let Some(f) = self.floors.get_mut(floor) {
            f.walls.push(id);
        }
        id
    }

    #[must_use]
    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(id)
    }

    #[must_use]
    pub fn floor(&self, level: usize) -> Option<&Floor> {
        self.floors.get(level)
    }

    #[must_use]
    pub fn floor_by_name(&self, name: &str) -> Option<&Floor> {
        if name.is_empty() {
            return None;
        }
        self.floors.iter().find(|f| f.name == name)
    }

    /// Walls of one floor in build order.
    pub fn floor_walls(&self, level: usize) -> impl Iterator<Item = &Wall> {
        self.floors
            .get(level)
            .into_iter()
            .flat_map(|f| &f.walls)
            .filter_map(|id| self.walls.get(*id))
    }

    /// Every wall, floor by floor.
    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.floors
            .iter()
            .flat_map(|f| &f.walls)
            .filter_map(|id| self.walls.get(*id))
    }

    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn floors_own_their_walls() {
        let mut b = Building::new("Test".into(), 10.0, 3.0, 6.0, Scale::identity());
        let ground = b.add_floor((0.0, 0.0, 0.0), 10.0, 6.0, "Ground".into());
        let first = b.add_floor((0.0, 3.0, 0.0), 10.0, 6.0, "First".into());

        let draft = b.floors[ground].add_wall(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let a = b.insert_wall(draft);
        let draft = b.floors[first].add_floor(0.0, 0.0, 0.0, 10.0, 0.2, 6.0);
        let c = b.insert_wall(draft);

        assert_eq!(b.floor_walls(ground).map(|w| w.id).collect::<Vec<_>>(), vec![a]);
        assert_eq!(b.floor_walls(first).map(|w| w.id).collect::<Vec<_>>(), vec![c]);
        assert_eq!(b.walls().count(), 2);
        assert!(b.wall(a).unwrap().sides.iter().all(|s| s.wall == a));
        assert_eq!(b.floor_by_name("First").unwrap().level, 1);
        assert!(b.floor_by_name("").is_none());
    }
}
