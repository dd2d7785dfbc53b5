use crate::geometry::LengthUnit;
use crate::model::{Building, Rotation};
use crate::view::state::ViewState;
use nalgebra::{Matrix4, Vector3};
use serde::Serialize;

/// Camera distance in multiples of the building depth.
const PERSPECTIVE_DEPTHS: f64 = 5.0;

/// Whole-building placement: centre, then yaw about the vertical axis, then
/// pitch about the horizontal axis. Recomputed from scratch on every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuildingTransform {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub yaw: i32,
    pub pitch: i32,
    pub pivot_y: f64,
    pub unit: LengthUnit,
}

impl BuildingTransform {
    #[must_use]
    pub fn new(building: &Building, state: &ViewState) -> Self {
        Self {
            width: building.width,
            height: building.height,
            depth: building.depth,
            yaw: state.yaw,
            pitch: state.pitch.degrees(),
            pivot_y: state.pivot_y,
            unit: building.unit(),
        }
    }

    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "translate(-50%, -50%) rotate3d(0, 1, 0, {}deg) rotate3d(1, 0, 0, {}deg)",
            self.yaw, self.pitch
        )
    }

    #[must_use]
    pub fn perspective(&self) -> f64 {
        PERSPECTIVE_DEPTHS * self.depth
    }

    #[must_use]
    pub fn perspective_css(&self) -> String {
        format!("{}{}", self.perspective(), self.unit)
    }

    #[must_use]
    pub fn perspective_origin(&self) -> String {
        format!("50% calc(50% + {}{})", self.pivot_y, self.unit)
    }

    /// Homogeneous matrix equivalent to [`BuildingTransform::css`].
    #[must_use]
    pub fn matrix(&self) -> Matrix4<f64> {
        let centre = Matrix4::new_translation(&Vector3::new(-self.width / 2.0, -self.height / 2.0, 0.0));
        centre
            * Rotation::about_y(f64::from(self.yaw)).matrix()
            * Rotation::about_x(f64::from(self.pitch)).matrix()
    }
}
