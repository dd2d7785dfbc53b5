use crate::geometry::LengthUnit;
use crate::model::{Floor, Wall, WallId};
use crate::sensor::overlay_transform;
use crate::view::{Scene, ViewState};
use serde::Serialize;
use slotmap::Key;

/// Everything a renderer needs to draw the current view.
#[derive(Debug, Serialize)]
pub struct SceneSnapshot<'a> {
    pub name: &'a str,
    pub unit: LengthUnit,
    pub ratio: f64,
    pub stylesheet: &'a str,
    pub view: &'a ViewState,
    pub transform: TransformSnapshot,
    pub floors: &'a [Floor],
    pub walls: Vec<WallSnapshot<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TransformSnapshot {
    pub css: String,
    pub perspective: String,
    pub perspective_origin: String,
    /// Row-major homogeneous matrix.
    pub matrix: [[f64; 4]; 4],
}

#[derive(Debug, Serialize)]
pub struct WallSnapshot<'a> {
    pub id: u64,
    pub visible: bool,
    #[serde(flatten)]
    pub wall: &'a Wall,
    /// CSS transform of each side, in side order.
    pub side_transforms: Vec<String>,
    /// Readout orientation on the main side; sensor walls only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
}

impl<'a> SceneSnapshot<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene) -> Self {
        let building = scene.building();
        let transform = scene.transform();
        let matrix = transform.matrix();
        let unit = building.unit();

        let walls = building
            .walls()
            .map(|wall| WallSnapshot {
                id: wall_key(wall.id),
                visible: scene.is_visible(wall.id),
                wall,
                side_transforms: wall.sides.iter().map(|s| s.placement.css(unit)).collect(),
                overlay: wall.is_sensor().then(|| overlay_transform(scene.state().yaw)),
            })
            .collect();

        Self {
            name: &building.name,
            unit,
            ratio: building.scale.ratio,
            stylesheet: &building.stylesheet,
            view: scene.state(),
            transform: TransformSnapshot {
                css: transform.css(),
                perspective: transform.perspective_css(),
                perspective_origin: transform.perspective_origin(),
                matrix: std::array::from_fn(|r| std::array::from_fn(|c| matrix[(r, c)])),
            },
            floors: &building.floors,
            walls,
        }
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.walls.iter().filter(|w| w.visible).count()
    }
}

/// Numeric form of a wall id for output formats.
#[must_use]
pub fn wall_key(id: WallId) -> u64 {
    id.data().as_ffi()
}
