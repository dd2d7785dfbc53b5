use crate::geometry::scale::LengthUnit;
use crate::model::wall::WallId;
use nalgebra::{Matrix4, Rotation3, Vector3};
use serde::Serialize;
use std::fmt;

/// Which of a box's six faces a side is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceKind {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl FaceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FaceKind::Front => "front",
            FaceKind::Back => "back",
            FaceKind::Left => "left",
            FaceKind::Right => "right",
            FaceKind::Top => "top",
            FaceKind::Bottom => "bottom",
        }
    }
}

impl fmt::Display for FaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rotation {
    pub axis: Axis,
    pub degrees: f64,
}

impl Rotation {
    #[must_use]
    pub fn about_x(degrees: f64) -> Self {
        Self {
            axis: Axis::X,
            degrees,
        }
    }

    #[must_use]
    pub fn about_y(degrees: f64) -> Self {
        Self {
            axis: Axis::Y,
            degrees,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> Matrix4<f64> {
        let axis = match self.axis {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
        };
        Rotation3::from_axis_angle(&axis, self.degrees.to_radians()).to_homogeneous()
    }

    fn css(&self) -> String {
        match self.axis {
            Axis::X => format!("rotateX({}deg)", self.degrees),
            Axis::Y => format!("rotateY({}deg)", self.degrees),
        }
    }
}

/// Translation followed by an optional rotation, in view space: y grows
/// downwards and z is centred on the building's depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub translate: [f64; 3],
    pub rotate: Option<Rotation>,
}

impl Placement {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, rotate: Option<Rotation>) -> Self {
        Self {
            translate: [x, y, z],
            rotate,
        }
    }

    /// Homogeneous matrix mapping face-local points into building space.
    #[must_use]
    pub fn matrix(&self) -> Matrix4<f64> {
        let [x, y, z] = self.translate;
        let translation = Matrix4::new_translation(&Vector3::new(x, y, z));
        match &self.rotate {
            Some(r) => translation * r.matrix(),
            None => translation,
        }
    }

    /// CSS transform text for a renderer working in viewport units.
    #[must_use]
    pub fn css(&self, unit: LengthUnit) -> String {
        let [x, y, z] = self.translate;
        let translate = format!("translate3d({x}{unit}, {y}{unit}, {z}{unit})");
        match &self.rotate {
            Some(r) => format!("{translate} {}", r.css()),
            None => translate,
        }
    }
}

/// One planar face of a wall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Side {
    pub kind: FaceKind,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub placement: Placement,
    #[serde(skip)]
    pub wall: WallId,
}

impl Side {
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}
