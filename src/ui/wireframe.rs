//! Flattening visible faces into 2D line segments for the canvas.

use crate::model::{Axis, Side, WallId};
use crate::view::Scene;
use nalgebra::{Matrix4, Point3};

/// One projected edge, in screen space with y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub wall: WallId,
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Outlines of every visible side, projected orthographically through the
/// building transform.
#[must_use]
pub fn wireframe(scene: &Scene) -> Vec<Segment> {
    let building = scene.transform().matrix();
    scene
        .visible_walls()
        .flat_map(|wall| wall.sides.iter().map(move |side| (wall.id, side)))
        .flat_map(|(wall, side)| outline(&building, side, wall))
        .collect()
}

fn outline(building: &Matrix4<f64>, side: &Side, wall: WallId) -> [Segment; 4] {
    let m = building * side.placement.matrix();
    // Horizontal faces extend along +y before their rotation, vertical
    // faces rise towards -y.
    let h = match side.placement.rotate {
        Some(r) if r.axis == Axis::X => side.height,
        _ => -side.height,
    };
    let corners = [(0.0, 0.0), (side.width, 0.0), (side.width, h), (0.0, h)].map(|(x, y)| {
        let p = m.transform_point(&Point3::new(x, y, 0.0));
        (p.x, -p.y)
    });
    std::array::from_fn(|i| Segment {
        wall,
        from: corners[i],
        to: corners[(i + 1) % 4],
    })
}

/// Smallest box containing every segment, padded by 5% per side. Falls back
/// to a unit box when there is nothing to draw.
#[must_use]
pub fn bounds(segments: &[Segment]) -> ([f64; 2], [f64; 2]) {
    let mut x = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y = [f64::INFINITY, f64::NEG_INFINITY];
    for (px, py) in segments.iter().flat_map(|s| [s.from, s.to]) {
        x = [x[0].min(px), x[1].max(px)];
        y = [y[0].min(py), y[1].max(py)];
    }
    if !(x[0].is_finite() && y[0].is_finite()) {
        return ([-1.0, 1.0], [-1.0, 1.0]);
    }
    let pad = |[lo, hi]: [f64; 2]| {
        let p = ((hi - lo) * 0.05).max(0.5);
        [lo - p, hi + p]
    };
    (pad(x), pad(y))
}
