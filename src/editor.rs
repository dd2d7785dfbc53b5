//! Live editing of a descriptor with the scene kept in step.
//!
//! Every edit changes the descriptor tree and rebuilds the whole building;
//! the camera, floor and layer selection survive the rebuild.

use crate::config::{Viewport, ViewerConfig};
use crate::geometry::{build_scene, should_rotate, ProjectionLookup};
use crate::model::{Building, WallId};
use crate::parser::{BoxDescriptor, BoxGroup, BuildingDescriptor, DescriptorRef, SensorDescriptor};
use crate::sensor::{MetricSource, Readout, SensorBoard};
use crate::view::{Scene, VisibilityDiff};
use std::collections::BTreeSet;
use std::time::Instant;

/// Slab height assumed when the first floor has no slab.
const DEFAULT_SLAB: f64 = 0.23;
const WALL_DEPTH: f64 = 0.17;
const INNER_WALL_DEPTH: f64 = 0.15;
const INNER_WALL_GAP: f64 = 0.20;
const WINDOW_DEPTH: f64 = 0.05;
const GLASS_DEPTH: f64 = 0.02;
const CEILING_HEIGHT: f64 = 0.20;
const ITEM_SIZE: f64 = 0.6;
const MOUNTED_SENSOR_SIZE: f64 = 0.1;
const MOUNTED_SENSOR_HEIGHT: f64 = 0.02;

/// Layer option that every descriptor offers.
pub const ALL_LAYER: &str = "all";

/// One field change on a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxEdit {
    X(f64),
    Y(f64),
    Z(f64),
    L(f64),
    D(f64),
    H(f64),
    /// Style classes; empty clears them.
    Class(String),
    /// Sensor endpoint; empty values are rejected.
    SensorApi(String),
    SensorUnit(String),
    SensorLayer(String),
    /// Seconds between polls.
    SensorPolling(f64),
}

impl BoxEdit {
    /// Applies a geometry or class edit, returning whether anything changed.
    /// Sensor edits never apply to a plain box.
    fn apply_to_shape(&self, shape: &mut BoxDescriptor) -> bool {
        match self {
            BoxEdit::X(v) => set_number(&mut shape.x, *v),
            BoxEdit::Y(v) => set_number(&mut shape.y, *v),
            BoxEdit::Z(v) => set_number(&mut shape.z, *v),
            BoxEdit::L(v) => set_number(&mut shape.l, *v),
            BoxEdit::D(v) => set_number(&mut shape.d, *v),
            BoxEdit::H(v) => set_number(&mut shape.h, *v),
            BoxEdit::Class(c) => set_text(&mut shape.class, c),
            BoxEdit::SensorApi(_)
            | BoxEdit::SensorUnit(_)
            | BoxEdit::SensorLayer(_)
            | BoxEdit::SensorPolling(_) => false,
        }
    }

    fn apply_to_sensor(&self, sensor: &mut SensorDescriptor) -> bool {
        match self {
            BoxEdit::SensorApi(api) => {
                if api.is_empty() || sensor.api == *api {
                    return false;
                }
                sensor.api.clone_from(api);
                true
            }
            BoxEdit::SensorUnit(unit) => set_text(&mut sensor.unit, unit),
            BoxEdit::SensorLayer(layer) => set_text(&mut sensor.layer, layer),
            BoxEdit::SensorPolling(v) => set_number(&mut sensor.polling_interval, *v),
            _ => self.apply_to_shape(&mut sensor.shape),
        }
    }
}

fn set_number(field: &mut f64, value: f64) -> bool {
    if !value.is_finite() || *field == value {
        return false;
    }
    *field = value;
    true
}

fn set_text(field: &mut Option<String>, value: &str) -> bool {
    let value = Some(value.to_string()).filter(|v| !v.is_empty());
    if *field == value {
        return false;
    }
    *field = value;
    true
}

/// An editing session over one building descriptor.
#[derive(Debug)]
pub struct Editor {
    descriptor: BuildingDescriptor,
    viewport: Viewport,
    lookup: ProjectionLookup,
    scene: Scene,
    sensors: SensorBoard,
    last_shape: Option<DescriptorRef>,
}

impl Editor {
    #[must_use]
    pub fn new(mut descriptor: BuildingDescriptor, config: &ViewerConfig) -> Self {
        let viewport = config.viewport;
        orient(&mut descriptor, viewport);
        let built = build_scene(&descriptor, viewport);
        let (scene, diff) = Scene::new(built.building, &config.floor, &config.layer);
        let mut editor = Self {
            descriptor,
            viewport,
            lookup: built.lookup,
            scene,
            sensors: SensorBoard::new(),
            last_shape: None,
        };
        editor.sync(&diff);
        if let Some(view) = config.view.as_deref() {
            editor.set_view(view);
        }
        editor
    }

    #[must_use]
    pub fn descriptor(&self) -> &BuildingDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn building(&self) -> &Building {
        self.scene.building()
    }

    #[must_use]
    pub fn sensors(&self) -> &SensorBoard {
        &self.sensors
    }

    /// Swaps in a whole new descriptor, e.g. after the file changed.
    pub fn replace(&mut self, mut descriptor: BuildingDescriptor) {
        orient(&mut descriptor, self.viewport);
        self.descriptor = descriptor;
        self.last_shape = None;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let built = build_scene(&self.descriptor, self.viewport);
        let floor = self.scene.floor_name().to_string();
        let layer = self.scene.state().layer.clone();
        self.lookup = built.lookup;
        let diff = self.scene.apply(built.building, &floor, &layer);
        self.sync(&diff);
    }

    fn sync(&mut self, diff: &VisibilityDiff) {
        self.sensors.sync(diff, self.scene.building(), Instant::now());
    }

    pub fn rotate_left(&mut self) {
        let diff = self.scene.rotate_left();
        self.sync(&diff);
    }

    pub fn rotate_right(&mut self) {
        let diff = self.scene.rotate_right();
        self.sync(&diff);
    }

    pub fn tilt_up(&mut self) {
        let diff = self.scene.tilt_up();
        self.sync(&diff);
    }

    pub fn tilt_down(&mut self) {
        let diff = self.scene.tilt_down();
        self.sync(&diff);
    }

    pub fn set_view(&mut self, view: &str) {
        let diff = self.scene.set_view(view);
        self.sync(&diff);
    }

    pub fn select_floor(&mut self, name: &str) {
        let diff = self.scene.select_floor(name);
        self.sync(&diff);
    }

    pub fn set_layer(&mut self, layer: &str) {
        let diff = self.scene.set_layer(layer);
        self.sync(&diff);
    }

    /// Polls due sensors; returns how many were polled.
    pub fn tick(&mut self, now: Instant, source: &dyn MetricSource) -> usize {
        self.sensors.tick(now, source)
    }

    #[must_use]
    pub fn readout(&self, wall: WallId) -> Option<&Readout> {
        self.sensors.readout(wall)
    }

    #[must_use]
    pub fn descriptor_ref(&self, wall: WallId) -> Option<DescriptorRef> {
        self.lookup.lookup(wall)
    }

    #[must_use]
    pub fn descriptor_for(&self, wall: WallId) -> Option<&BoxDescriptor> {
        self.descriptor.shape(&self.lookup.lookup(wall)?)
    }

    #[must_use]
    pub fn sensor_for(&self, wall: WallId) -> Option<&SensorDescriptor> {
        self.descriptor.sensor(&self.lookup.lookup(wall)?)
    }

    #[must_use]
    pub fn wall_for(&self, at: &DescriptorRef) -> Option<WallId> {
        self.lookup.find_wall(at)
    }

    /// Remembers the wall's descriptor as the anchor for the next mounted
    /// sensor. Returns the descriptor, or `None` for an unknown wall.
    pub fn select(&mut self, wall: WallId) -> Option<&BoxDescriptor> {
        let at = self.lookup.lookup(wall)?;
        self.last_shape = Some(at);
        self.descriptor.shape(&at)
    }

    #[must_use]
    pub fn last_shape(&self) -> Option<DescriptorRef> {
        self.last_shape
    }

    /// Appends a default-sized box of `group` to the first floor and returns
    /// the wall built from it. `None` when the descriptor has no floors or
    /// the box expands to nothing.
    pub fn add_shape(&mut self, group: BoxGroup) -> Option<WallId> {
        let shape = self.default_shape(group)?;
        let index = self.descriptor.floors.first_mut()?.push_shape(group, shape);
        self.rebuild();
        let at = DescriptorRef { floor: 0, group, index };
        tracing::info!(group = %group, index, "Added shape");
        let wall = self.wall_for(&at)?;
        self.last_shape = Some(at);
        Some(wall)
    }

    fn default_shape(&self, group: BoxGroup) -> Option<BoxDescriptor> {
        let building_h = self.descriptor.h;
        let floor = self.descriptor.floors.first()?;
        let mut y = floor.floors.first().map_or(DEFAULT_SLAB, |slab| slab.h);
        let mut h = building_h - y;
        let mut d = WALL_DEPTH;
        let (mut x, mut z, mut l) = (floor.x, floor.z, floor.l);

        match group {
            BoxGroup::OuterWalls => {}
            BoxGroup::InnerWalls => {
                d = INNER_WALL_DEPTH;
                h -= INNER_WALL_GAP;
            }
            BoxGroup::Windows => d = WINDOW_DEPTH,
            BoxGroup::Glass => d = GLASS_DEPTH,
            BoxGroup::Ceilings => {
                y = building_h - CEILING_HEIGHT;
                h = CEILING_HEIGHT;
            }
            BoxGroup::FloorSlabs => {
                h = y;
                y = 0.0;
            }
            BoxGroup::Items => (l, d, h) = (ITEM_SIZE, ITEM_SIZE, ITEM_SIZE),
            BoxGroup::Sensors => match self.last_shape.and_then(|at| self.descriptor.shape(&at)) {
                Some(anchor) => {
                    (l, d, h) = (MOUNTED_SENSOR_SIZE, MOUNTED_SENSOR_SIZE, MOUNTED_SENSOR_HEIGHT);
                    y = anchor.y + anchor.h;
                    x = round2(anchor.x + anchor.l / 2.0);
                    z = round2(anchor.z + anchor.d / 2.0);
                }
                None => (l, d, h) = (ITEM_SIZE, ITEM_SIZE, ITEM_SIZE),
            },
        }

        Some(BoxDescriptor::new(x, y, z, l, d, h))
    }

    /// Changes one field of the wall's descriptor and rebuilds.
    ///
    /// Returns the wall now generated from the same descriptor. Unknown
    /// walls return `None`; edits that change nothing return the wall
    /// unchanged without rebuilding.
    pub fn edit(&mut self, wall: WallId, edit: &BoxEdit) -> Option<WallId> {
        let at = self.lookup.lookup(wall)?;
        let changed = match self.descriptor.sensor_mut(&at) {
            Some(sensor) => edit.apply_to_sensor(sensor),
            None => edit.apply_to_shape(self.descriptor.shape_mut(&at)?),
        };
        if !changed {
            return Some(wall);
        }
        tracing::debug!(?at, ?edit, "Edited shape");
        self.rebuild();
        self.last_shape = Some(at);
        self.wall_for(&at)
    }

    /// Removes the wall's descriptor and rebuilds. Returns whether anything
    /// was removed.
    pub fn delete(&mut self, wall: WallId) -> bool {
        let Some(at) = self.lookup.lookup(wall) else {
            return false;
        };
        if !self.descriptor.remove(&at) {
            return false;
        }
        tracing::info!(?at, "Deleted shape");
        self.last_shape = None;
        self.rebuild();
        true
    }

    /// `all` plus every sensor layer, sorted and without repeats.
    #[must_use]
    pub fn layer_options(&self) -> Vec<String> {
        std::iter::once(ALL_LAYER)
            .chain(self.descriptor.sensor_layers())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Names of the named floors, in order.
    #[must_use]
    pub fn floor_options(&self) -> Vec<String> {
        self.descriptor
            .floors
            .iter()
            .map(|f| f.name())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The descriptor as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.descriptor)
    }
}

fn orient(descriptor: &mut BuildingDescriptor, viewport: Viewport) {
    if should_rotate(viewport, descriptor) {
        tracing::debug!(%viewport, "Rotating descriptor to match viewport");
        descriptor.rotate();
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_descriptor_str;
    use crate::view::Pitch;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    const HOUSE: &str = r#"{
        "name": "House", "l": 10, "d": 6, "h": 3,
        "floors": [{
            "name": "Ground", "l": 10, "d": 6,
            "floors": [{"l": 10, "d": 6, "h": 0.2}],
            "walls": {"outer": [{"l": 10, "d": 0.2, "h": 3}]},
            "items": [{"x": 2, "y": 0.2, "z": 2, "l": 1, "d": 1, "h": 0.5}],
            "sensors": [
                {"x": 1, "z": 1, "l": 0.2, "d": 0.2, "h": 0.2, "api": "testAPI", "layer": "temp"},
                {"x": 3, "z": 1, "l": 0.2, "d": 0.2, "h": 0.2, "api": "testAPI", "layer": "co2"},
                {"x": 5, "z": 1, "l": 0.2, "d": 0.2, "h": 0.2, "api": "testAPI", "layer": "temp"}
            ]
        }, {"name": "", "y": 3, "l": 10, "d": 6}]
    }"#;

    fn editor() -> Editor {
        Editor::new(parse_descriptor_str(HOUSE).unwrap(), &ViewerConfig::default())
    }

    fn wall_of(e: &Editor, group: BoxGroup, index: usize) -> WallId {
        e.wall_for(&DescriptorRef { floor: 0, group, index }).unwrap()
    }

    #[test]
    fn adds_walls_with_default_dimensions() {
        let mut e = editor();
        let wall = e.add_shape(BoxGroup::InnerWalls).unwrap();
        let shape = e.descriptor_for(wall).unwrap();
        assert_relative_eq!(shape.y, 0.2);
        assert_relative_eq!(shape.l, 10.0);
        assert_relative_eq!(shape.d, 0.15);
        assert_relative_eq!(shape.h, 2.6, epsilon = 1e-9);
        assert_eq!(e.descriptor().floors[0].walls.inner.len(), 1);

        let ceiling = e.add_shape(BoxGroup::Ceilings).unwrap();
        let shape = e.descriptor_for(ceiling).unwrap();
        assert_relative_eq!(shape.y, 2.8, epsilon = 1e-9);
        assert_relative_eq!(shape.h, 0.2);

        let slab = e.add_shape(BoxGroup::FloorSlabs).unwrap();
        let shape = e.descriptor_for(slab).unwrap();
        assert_relative_eq!(shape.h, 0.2);
        assert_relative_eq!(shape.y, 0.0);
    }

    #[test]
    fn sensor_is_mounted_on_last_selected_shape() {
        let mut e = editor();
        let item = wall_of(&e, BoxGroup::Items, 0);
        assert!(e.select(item).is_some());

        let sensor = e.add_shape(BoxGroup::Sensors).unwrap();
        let s = e.sensor_for(sensor).unwrap();
        assert_relative_eq!(s.shape.x, 2.5);
        assert_relative_eq!(s.shape.y, 0.7);
        assert_relative_eq!(s.shape.z, 2.5);
        assert_relative_eq!(s.shape.l, 0.1);
        assert_relative_eq!(s.shape.h, 0.02);
        assert_relative_eq!(s.polling_interval, 30.0);
        assert_eq!(e.last_shape().unwrap().group, BoxGroup::Sensors);
    }

    #[test]
    fn free_sensor_without_selection() {
        let mut e = editor();
        let sensor = e.add_shape(BoxGroup::Sensors).unwrap();
        let s = e.sensor_for(sensor).unwrap();
        assert_relative_eq!(s.shape.l, 0.6);
        assert_relative_eq!(s.shape.x, 0.0);
    }

    #[test]
    fn edits_round_trip_to_the_same_descriptor() {
        let mut e = editor();
        let item = wall_of(&e, BoxGroup::Items, 0);
        let edited = e.edit(item, &BoxEdit::X(4.0)).unwrap();
        assert_relative_eq!(e.descriptor_for(edited).unwrap().x, 4.0);
        assert_eq!(
            e.descriptor_ref(edited),
            Some(DescriptorRef { floor: 0, group: BoxGroup::Items, index: 0 })
        );

        let edited = e.edit(edited, &BoxEdit::Class("wood".into())).unwrap();
        assert!(e.building().wall(edited).unwrap().has_tag("wood"));
    }

    #[test]
    fn rejected_edits_change_nothing() {
        let mut e = editor();
        let item = wall_of(&e, BoxGroup::Items, 0);
        let before = e.descriptor().clone();
        assert_eq!(e.edit(item, &BoxEdit::L(f64::NAN)), Some(item));
        assert_eq!(e.edit(item, &BoxEdit::SensorApi("https://x.test".into())), Some(item));
        assert_eq!(e.descriptor(), &before);
        assert_eq!(e.edit(WallId::default(), &BoxEdit::X(1.0)), None);
    }

    #[test]
    fn sensor_edits_apply_to_sensors() {
        let mut e = editor();
        let sensor = wall_of(&e, BoxGroup::Sensors, 1);
        let sensor = e.edit(sensor, &BoxEdit::SensorUnit("ppm".into())).unwrap();
        assert_eq!(e.sensor_for(sensor).unwrap().unit.as_deref(), Some("ppm"));
        let sensor = e.edit(sensor, &BoxEdit::SensorApi(String::new())).unwrap();
        assert_eq!(e.sensor_for(sensor).unwrap().api, "testAPI");
    }

    #[test]
    fn deletes_from_the_owning_list() {
        let mut e = editor();
        let count = e.building().wall_count();
        let wall = wall_of(&e, BoxGroup::OuterWalls, 0);
        assert!(e.delete(wall));
        assert!(e.descriptor().floors[0].walls.outer.is_empty());
        assert_eq!(e.building().wall_count(), count - 1);
        assert!(!e.delete(WallId::default()));
    }

    #[test]
    fn view_survives_rebuilds() {
        let mut e = editor();
        e.select_floor("Ground");
        e.set_layer("temp");
        e.rotate_left();
        let item = wall_of(&e, BoxGroup::Items, 0);
        e.edit(item, &BoxEdit::H(1.0));
        let state = e.scene().state();
        assert_eq!((state.yaw, state.floor, state.layer.as_str()), (45, Some(0), "temp"));
    }

    #[test]
    fn layer_and_floor_options() {
        let e = editor();
        assert_eq!(e.layer_options(), vec!["all", "co2", "temp"]);
        assert_eq!(e.floor_options(), vec!["Ground"]);
    }

    #[test]
    fn initial_view_from_config() {
        let config = ViewerConfig {
            view: Some("top".into()),
            ..ViewerConfig::default()
        };
        let e = Editor::new(parse_descriptor_str(HOUSE).unwrap(), &config);
        assert_eq!(e.scene().state().pitch, Pitch::TopDown);
    }

    #[test]
    fn visible_sensors_get_pollers() {
        let mut e = editor();
        assert_eq!(e.sensors().active_count(), 0);
        e.select_floor("Ground");
        e.set_layer("temp");
        assert_eq!(e.sensors().active_count(), 2);
        e.set_layer("co2");
        assert_eq!(e.sensors().active_count(), 1);
    }

    #[test]
    fn serializes_descriptor() {
        let json = editor().to_json().unwrap();
        let back = parse_descriptor_str(&json).unwrap();
        assert_eq!(&back, editor().descriptor());
    }
}
