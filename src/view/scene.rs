use crate::model::{Building, Wall, WallId};
use crate::view::state::{Pitch, ViewState};
use crate::view::transform::BuildingTransform;
use crate::view::visibility::is_visible;
use std::collections::HashSet;

/// Walls that left and entered the visible set in one recompute.
///
/// Consumers must process `hidden` before `shown` so per-wall resources are
/// released before new ones start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityDiff {
    pub hidden: Vec<WallId>,
    pub shown: Vec<WallId>,
}

impl VisibilityDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.shown.is_empty()
    }
}

/// A building under a camera.
///
/// Every command recomputes visibility for all walls and the building
/// transform, and reports what changed.
#[derive(Debug)]
pub struct Scene {
    building: Building,
    state: ViewState,
    visible: Vec<WallId>,
    transform: BuildingTransform,
}

impl Scene {
    /// Shows `building` with the floor named `floor` (empty for the stacked
    /// view) and `layer` active.
    #[must_use]
    pub fn new(building: Building, floor: &str, layer: &str) -> (Self, VisibilityDiff) {
        let level = building.floor_by_name(floor).map(|f| f.level);
        let state = ViewState {
            pivot_y: building.height,
            ..ViewState::default()
        }
        .with_floor(level, building.height)
        .with_layer(layer)
        .reset_pitch(Pitch::Normal);
        let transform = BuildingTransform::new(&building, &state);
        let mut scene = Self {
            building,
            state,
            visible: Vec::new(),
            transform,
        };
        let diff = scene.render();
        (scene, diff)
    }

    /// Replaces the building, keeping the camera where it is and
    /// re-selecting the floor by name.
    ///
    /// Every wall of the old building is reported hidden; ids may repeat
    /// between builds, in which case a wall appears in both lists.
    pub fn apply(&mut self, building: Building, floor: &str, layer: &str) -> VisibilityDiff {
        let old_height = std::mem::replace(&mut self.building, building).height;
        let mut hidden = std::mem::take(&mut self.visible);
        let level = self.building.floor_by_name(floor).map(|f| f.level);
        let height = self.building.height;
        let mut diff = self.update(|s| {
            let mut s = s.with_floor(level, height).with_layer(layer);
            // the elevation pivot set on leaving plan mode follows the height
            if !s.is_plan() && !s.is_top_down() && s.pivot_y == old_height {
                s.pivot_y = height;
            }
            s
        });
        hidden.append(&mut diff.hidden);
        diff.hidden = hidden;
        diff
    }

    #[must_use]
    pub fn building(&self) -> &Building {
        &self.building
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn transform(&self) -> &BuildingTransform {
        &self.transform
    }

    /// Name of the selected floor, empty in the stacked view.
    #[must_use]
    pub fn floor_name(&self) -> &str {
        self.state
            .floor
            .and_then(|level| self.building.floor(level))
            .map_or("", |f| f.name.as_str())
    }

    #[must_use]
    pub fn is_visible(&self, wall: WallId) -> bool {
        self.visible.contains(&wall)
    }

    /// Visible walls, floor by floor in build order.
    pub fn visible_walls(&self) -> impl Iterator<Item = &Wall> {
        self.visible.iter().filter_map(|id| self.building.wall(*id))
    }

    pub fn rotate_left(&mut self) -> VisibilityDiff {
        self.update(ViewState::rotate_left)
    }

    pub fn rotate_right(&mut self) -> VisibilityDiff {
        self.update(ViewState::rotate_right)
    }

    pub fn tilt_up(&mut self) -> VisibilityDiff {
        self.update(ViewState::tilt_to_top)
    }

    pub fn tilt_down(&mut self) -> VisibilityDiff {
        self.update(ViewState::tilt_to_normal)
    }

    pub fn set_view(&mut self, view: &str) -> VisibilityDiff {
        self.update(|s| s.with_view(view))
    }

    /// Selects a floor by name; an unknown or empty name selects the
    /// stacked view.
    pub fn select_floor(&mut self, name: &str) -> VisibilityDiff {
        let level = self.building.floor_by_name(name).map(|f| f.level);
        let height = self.building.height;
        self.update(|s| s.with_floor(level, height))
    }

    pub fn set_layer(&mut self, layer: &str) -> VisibilityDiff {
        self.update(|s| s.with_layer(layer))
    }

    fn update(&mut self, transition: impl FnOnce(ViewState) -> ViewState) -> VisibilityDiff {
        self.state = transition(std::mem::take(&mut self.state));
        self.render()
    }

    /// Recomputes visibility for every wall and the building transform.
    pub fn render(&mut self) -> VisibilityDiff {
        let visible: Vec<WallId> = self
            .building
            .walls()
            .filter(|w| is_visible(w, &self.state))
            .map(|w| w.id)
            .collect();

        let now: HashSet<WallId> = visible.iter().copied().collect();
        let before: HashSet<WallId> = self.visible.iter().copied().collect();
        let diff = VisibilityDiff {
            hidden: self.visible.iter().copied().filter(|id| !now.contains(id)).collect(),
            shown: visible.iter().copied().filter(|id| !before.contains(id)).collect(),
        };

        self.visible = visible;
        self.transform = BuildingTransform::new(&self.building, &self.state);
        tracing::trace!(
            yaw = self.state.yaw,
            pitch = self.state.pitch.degrees(),
            floor = ?self.state.floor,
            layer = %self.state.layer,
            visible = self.visible.len(),
            hidden = diff.hidden.len(),
            shown = diff.shown.len(),
            "Recomputed view"
        );
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_with_scale, Scale};
    use crate::parser::parse_descriptor_str;
    use pretty_assertions::assert_eq;

    const TWO_FLOORS: &str = r#"{
        "l": 10, "d": 6, "h": 6,
        "floors": [
            {"name": "Ground", "l": 10, "d": 6,
             "walls": {"outer": [{"l": 10, "d": 0.2, "h": 3}]},
             "ceilings": [{"y": 2.8, "l": 10, "d": 6, "h": 0.2}]},
            {"name": "First", "y": 3, "l": 10, "d": 6,
             "walls": {"outer": [{"l": 10, "d": 0.2, "h": 3}]}}
        ]
    }"#;

    fn building() -> Building {
        build_with_scale(&parse_descriptor_str(TWO_FLOORS).unwrap(), Scale::identity()).building
    }

    #[test]
    fn stacked_view_shows_every_floor() {
        let (scene, diff) = Scene::new(building(), "", "");
        assert_eq!(diff.shown.len(), 3);
        assert!(diff.hidden.is_empty());
        assert_eq!(scene.state().pivot_y, -40.0);
        assert_eq!(scene.floor_name(), "");
    }

    #[test]
    fn plan_mode_culls_and_hides_ceilings() {
        let (mut scene, _) = Scene::new(building(), "", "");
        let diff = scene.select_floor("Ground");
        // ground front wall culled at yaw 0, its ceiling and the first floor gone
        assert_eq!(diff.hidden.len(), 3);
        assert!(diff.shown.is_empty());
        assert_eq!(scene.floor_name(), "Ground");

        assert!(scene.rotate_left().is_empty());
    }

    #[test]
    fn rotating_reveals_culled_walls() {
        let (mut scene, _) = Scene::new(building(), "Ground", "");
        assert_eq!(scene.visible_walls().count(), 0);
        scene.rotate_left();
        assert_eq!(scene.visible_walls().count(), 0);
        let diff = scene.rotate_left();
        assert_eq!(diff.shown.len(), 1);
        assert_eq!(scene.state().yaw, 90);
    }

    #[test]
    fn selecting_a_floor_resets_camera() {
        let (mut scene, _) = Scene::new(building(), "", "");
        scene.rotate_left();
        scene.rotate_left();
        scene.rotate_left();
        assert_eq!(scene.state().yaw, 135);
        scene.select_floor("First");
        assert_eq!((scene.state().yaw, scene.state().pitch), (0, Pitch::Normal));
    }

    #[test]
    fn apply_reports_old_walls_hidden() {
        let (mut scene, first) = Scene::new(building(), "", "");
        let diff = scene.apply(building(), "", "");
        assert_eq!(diff.hidden, first.shown);
        assert_eq!(diff.shown, first.shown);
    }

    #[test]
    fn apply_moves_elevation_pivot_with_height() {
        let (mut scene, _) = Scene::new(building(), "Ground", "");
        scene.select_floor("");
        assert_eq!(scene.state().pivot_y, 6.0);

        let taller = TWO_FLOORS.replace(r#""h": 6,"#, r#""h": 9,"#);
        let taller = build_with_scale(&parse_descriptor_str(&taller).unwrap(), Scale::identity()).building;
        scene.apply(taller, "", "");
        assert_eq!(scene.state().pivot_y, 9.0);
        assert_eq!(scene.transform().pivot_y, 9.0);
    }

    #[test]
    fn apply_keeps_initial_pivot() {
        let (mut scene, _) = Scene::new(building(), "", "");
        scene.apply(building(), "", "");
        assert_eq!(scene.state().pivot_y, -40.0);
    }

    #[test]
    fn transform_follows_state() {
        let (mut scene, _) = Scene::new(building(), "", "");
        scene.set_view("top");
        assert_eq!(scene.transform().pitch, -90);
        assert!(scene.transform().css().ends_with("rotate3d(1, 0, 0, -90deg)"));
    }
}
