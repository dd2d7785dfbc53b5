use crate::model::side::{FaceKind, Side};
use crate::sensor::SensorSpec;
use serde::Serialize;
use std::fmt;

slotmap::new_key_type! {
    /// Stable identifier of a generated wall.
    pub struct WallId;
}

/// Axis-aligned box in building space: `(x, y, z)` is the front-bottom-left
/// corner, the box extends `+width` along x, `+height` upwards and `depth`
/// towards negative z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoxExtent {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Ordered, duplicate-free set of space separated names.
///
/// Used for style tags and layer membership. Adding returns a new set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Parses a space separated list.
    #[must_use]
    pub fn parse(names: &str) -> Self {
        Self::default().with(names)
    }

    /// Returns a copy with every name in `names` added.
    #[must_use]
    pub fn with(mut self, names: &str) -> Self {
        for name in names.split_whitespace() {
            if !self.contains(name) {
                self.0.push(name.to_string());
            }
        }
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// In which display modes a wall may appear at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    #[default]
    Everywhere,
    /// Only when a floor is selected.
    OnlyOnPlan,
    /// Only in the stacked 3D view.
    OnlyOn3D,
}

/// One box-shaped building element, expanded into its faces.
///
/// Created once by [`WallDraft::finish`] and never modified afterwards; a
/// descriptor edit rebuilds the whole building.
#[derive(Debug, Clone, Serialize)]
pub struct Wall {
    #[serde(skip)]
    pub id: WallId,
    pub floor: usize,
    pub extent: BoxExtent,
    pub sides: Vec<Side>,
    pub main_side: FaceKind,
    pub tags: Tags,
    pub layers: Tags,
    pub presence: Presence,
    #[serde(skip)]
    pub sensor: Option<SensorSpec>,
}

impl Wall {
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub fn only_on_plan(&self) -> bool {
        self.presence == Presence::OnlyOnPlan
    }

    #[must_use]
    pub fn only_on_3d(&self) -> bool {
        self.presence == Presence::OnlyOn3D
    }

    #[must_use]
    pub fn side(&self, kind: FaceKind) -> Option<&Side> {
        self.sides.iter().find(|s| s.kind == kind)
    }

    /// The face that hosts overlays, if it survived pruning.
    #[must_use]
    pub fn main_side(&self) -> Option<&Side> {
        self.side(self.main_side)
    }

    #[must_use]
    pub fn is_sensor(&self) -> bool {
        self.has_tag("sensor") && self.sensor.is_some()
    }
}

/// A wall under construction: faces computed, tags still being assigned.
#[derive(Debug, Clone)]
pub struct WallDraft {
    pub floor: usize,
    pub extent: BoxExtent,
    pub sides: Vec<Side>,
    pub main_side: FaceKind,
    pub tags: Tags,
    pub layers: Tags,
    pub presence: Presence,
    pub sensor: Option<SensorSpec>,
}

impl WallDraft {
    /// Keeps the materialized faces, in paint order, and picks the main side
    /// from all six candidates.
    ///
    /// `faces` must hold one side per [`FaceKind`]. Faces with zero width or
    /// height are dropped; a zero-width left face also drops the back face
    /// and a zero-width front face drops the right face, so flat elements do
    /// not keep a stray depth wall.
    #[must_use]
    pub fn from_faces(floor: usize, extent: BoxExtent, faces: [Side; 6]) -> Self {
        let width_of = |kind: FaceKind| faces.iter().find(|s| s.kind == kind).map_or(0.0, |s| s.width);
        let height_of = |kind: FaceKind| faces.iter().find(|s| s.kind == kind).map_or(0.0, |s| s.height);

        let main_side = if height_of(FaceKind::Front) < height_of(FaceKind::Top) {
            FaceKind::Top
        } else if width_of(FaceKind::Left) < width_of(FaceKind::Front) {
            FaceKind::Front
        } else {
            FaceKind::Left
        };

        let drop_back = width_of(FaceKind::Left) == 0.0;
        let drop_right = width_of(FaceKind::Front) == 0.0;

        let mut sides: Vec<Side> = faces.into_iter().filter(|s| !s.is_degenerate()).collect();
        sides.sort_by_key(|s| paint_order(s.kind));
        let mut draft = Self {
            floor,
            extent,
            sides,
            main_side,
            tags: Tags::parse("wall"),
            layers: Tags::default(),
            presence: Presence::Everywhere,
            sensor: None,
        };
        if drop_back {
            draft = draft.without(FaceKind::Back);
        }
        if drop_right {
            draft = draft.without(FaceKind::Right);
        }
        draft
    }

    /// Drops a face; a face that is not present is ignored.
    #[must_use]
    pub fn without(mut self, kind: FaceKind) -> Self {
        self.sides.retain(|s| s.kind != kind);
        self
    }

    /// Replaces every tag with `tags`.
    #[must_use]
    pub fn tagged(mut self, tags: &str) -> Self {
        self.tags = Tags::parse(tags);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = self.tags.with(tags);
        self
    }

    #[must_use]
    pub fn on_layer(mut self, layer: Option<&str>) -> Self {
        if let Some(layer) = layer.filter(|l| !l.is_empty()) {
            self.layers = self.layers.with(layer);
        }
        self
    }

    #[must_use]
    pub fn only_on_plan(mut self) -> Self {
        self.presence = Presence::OnlyOnPlan;
        self
    }

    #[must_use]
    pub fn only_on_3d(mut self) -> Self {
        self.presence = Presence::OnlyOn3D;
        self
    }

    #[must_use]
    pub fn with_sensor(mut self, sensor: SensorSpec) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Freezes the draft under its arena id.
    #[must_use]
    pub fn finish(self, id: WallId) -> Wall {
        let sides = self
            .sides
            .into_iter()
            .map(|side| Side { wall: id, ..side })
            .collect();
        Wall {
            id,
            floor: self.floor,
            extent: self.extent,
            sides,
            main_side: self.main_side,
            tags: self.tags,
            layers: self.layers,
            presence: self.presence,
            sensor: self.sensor,
        }
    }
}

fn paint_order(kind: FaceKind) -> u8 {
    match kind {
        FaceKind::Bottom => 0,
        FaceKind::Back => 1,
        FaceKind::Left => 2,
        FaceKind::Right => 3,
        FaceKind::Top => 4,
        FaceKind::Front => 5,
    }
}
