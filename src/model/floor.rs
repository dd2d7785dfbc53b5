use crate::model::side::{FaceKind, Placement, Rotation, Side};
use crate::model::wall::{BoxExtent, WallDraft, WallId};
use serde::Serialize;

/// Share of a floor dimension within which a wall counts as lying on an edge.
const EDGE_BAND: f64 = 0.05;

/// A horizontal slice of the building.
#[derive(Debug, Clone, Serialize)]
pub struct Floor {
    pub level: usize,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(skip)]
    pub walls: Vec<WallId>,
    /// Depth of the whole building, used to centre the scene on z.
    building_depth: f64,
}

impl Floor {
    #[must_use]
    pub fn new(
        level: usize,
        name: String,
        (x, y, z): (f64, f64, f64),
        width: f64,
        depth: f64,
        building_depth: f64,
    ) -> Self {
        Self {
            level,
            name,
            x,
            y,
            z,
            width,
            depth,
            walls: Vec::new(),
            building_depth,
        }
    }

    #[must_use]
    pub fn is_on_front(&self, b: &BoxExtent) -> bool {
        b.z + b.depth < self.depth * EDGE_BAND
    }

    #[must_use]
    pub fn is_on_back(&self, b: &BoxExtent) -> bool {
        b.z > self.depth * (1.0 - EDGE_BAND)
    }

    #[must_use]
    pub fn is_on_left(&self, b: &BoxExtent) -> bool {
        b.x + b.width < self.width * EDGE_BAND
    }

    #[must_use]
    pub fn is_on_right(&self, b: &BoxExtent) -> bool {
        b.x > self.width * (1.0 - EDGE_BAND)
    }

    /// Expands a floor-local box into up to six placed faces.
    ///
    /// Coordinates are made absolute by adding the floor origin. Each face
    /// is placed in view space, where y is negated and z is offset by half
    /// the building depth.
    #[must_use]
    pub fn add_wall(&self, x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> WallDraft {
        let (x, y, z) = (self.x + x, self.y + y, self.z + z);
        let (vx, vy, vz) = (x, 0.0 - y, self.building_depth / 2.0 - z);

        let face = |kind: FaceKind,
                    (px, py, pz): (f64, f64, f64),
                    (w, h): (f64, f64),
                    placement: Placement| Side {
            kind,
            x: px,
            y: py,
            z: pz,
            width: w,
            height: h,
            placement,
            wall: WallId::default(),
        };

        let faces = [
            face(
                FaceKind::Front,
                (x, y, z),
                (width, height),
                Placement::new(vx, vy, vz, None),
            ),
            face(
                FaceKind::Back,
                (x, y, z - depth),
                (width, height),
                Placement::new(vx, vy, vz - depth, Some(Rotation::about_y(180.0))),
            ),
            face(
                FaceKind::Left,
                (x, y, z - depth),
                (depth, height),
                Placement::new(vx, vy, vz - depth, Some(Rotation::about_y(-90.0))),
            ),
            face(
                FaceKind::Right,
                (x + width, y, z),
                (depth, height),
                Placement::new(vx + width, vy, vz, Some(Rotation::about_y(90.0))),
            ),
            face(
                FaceKind::Top,
                (x, y - height, z),
                (width, depth),
                Placement::new(vx, vy - height, vz, Some(Rotation::about_x(90.0))),
            ),
            face(
                FaceKind::Bottom,
                (x, y, z),
                (width, depth),
                Placement::new(vx, vy, vz, Some(Rotation::about_x(90.0))),
            ),
        ];

        let extent = BoxExtent {
            x,
            y,
            z,
            width,
            height,
            depth,
        };
        WallDraft::from_faces(self.level, extent, faces)
    }

    /// A floor slab.
    #[must_use]
    pub fn add_floor(&self, x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> WallDraft {
        self.add_wall(x, y, z, width, height, depth).tagged("floor")
    }

    #[must_use]
    pub fn add_window(&self, x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> WallDraft {
        self.add_wall(x, y, z, width, height, depth).tagged("window")
    }

    /// A glass pane: no bottom face, shown only in plan mode.
    #[must_use]
    pub fn add_glass(&self, x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> WallDraft {
        self.add_wall(x, y, z, width, height, depth)
            .without(FaceKind::Bottom)
            .only_on_plan()
            .tagged("glass")
    }

    /// A ceiling, shown only in the stacked 3D view.
    #[must_use]
    pub fn add_ceiling(&self, x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> WallDraft {
        self.add_wall(x, y, z, width, height, depth)
            .only_on_3d()
            .tagged("ceiling")
    }
}
