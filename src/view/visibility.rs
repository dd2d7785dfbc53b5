//! Which walls the current view shows.

use crate::model::Wall;
use crate::view::state::ViewState;
use std::ops::RangeInclusive;

/// Yaw bands, in normalized degrees, in which an outer wall on the given
/// edge faces the camera and would hide the plan behind it. Neighbouring
/// bands overlap so diagonal views drop both walls.
const FACING_CAMERA: [(&str, RangeInclusive<i32>); 5] = [
    ("outer-front", 0..=60),
    ("outer-front", 300..=359),
    ("outer-left", 30..=150),
    ("outer-back", 120..=240),
    ("outer-right", 215..=335),
];

/// Whether `wall` may be shown in `state`, ignoring which floors are on
/// screen.
#[must_use]
pub fn can_show_wall(wall: &Wall, state: &ViewState) -> bool {
    if !wall.layers.is_empty() && !wall.layers.contains(&state.layer) {
        return false;
    }
    if wall.sides.is_empty() {
        return false;
    }
    if wall.only_on_3d() && state.is_plan() {
        return false;
    }
    if wall.only_on_plan() && !state.is_plan() {
        return false;
    }
    if state.is_top_down() || !state.is_plan() {
        return true;
    }

    let yaw = state.normalized_yaw();
    !FACING_CAMERA
        .iter()
        .any(|(tag, band)| band.contains(&yaw) && wall.has_tag(tag))
}

/// Whether the floor at `level` is on screen: every floor in the stacked
/// view, only the selected one in plan mode.
#[must_use]
pub fn is_floor_displayed(level: usize, state: &ViewState) -> bool {
    !matches!(state.floor, Some(selected) if selected != level)
}

#[must_use]
pub fn is_visible(wall: &Wall, state: &ViewState) -> bool {
    is_floor_displayed(wall.floor, state) && can_show_wall(wall, state)
}
