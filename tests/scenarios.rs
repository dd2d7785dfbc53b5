use building_viewer::config::{Viewport, ViewerConfig};
use building_viewer::editor::{BoxEdit, Editor};
use building_viewer::geometry::{build_scene, build_with_scale, Scale};
use building_viewer::model::FaceKind;
use building_viewer::parser::{parse_descriptor_str, BoxGroup, BuildingDescriptor, DescriptorRef};
use building_viewer::sensor::TestSource;
use building_viewer::view::{Pitch, Scene};
use pretty_assertions::assert_eq;

const OFFICE: &str = r#"{
    "name": "Office",
    "l": 20, "d": 12, "h": 7,
    "styles": [{"class": "brick", "style": "background: brown"}],
    "floors": [
        {
            "name": "Ground", "l": 20, "d": 12,
            "floors": [{"l": 20, "d": 12, "h": 0.2}],
            "walls": {
                "outer": [
                    {"l": 20, "d": 0.3, "h": 3.5, "class": "brick"},
                    {"z": 12, "l": 20, "d": 0.3, "h": 3.5},
                    {"l": 12, "d": 0.3, "h": 3.5, "o": "ns"},
                    {"x": 19.7, "z": 12, "l": 12, "d": 0.3, "h": 3.5, "o": "ns"}
                ],
                "inner": [{"x": 8, "z": 6, "l": 4, "d": 0.15, "h": 3}]
            },
            "sensors": [{"x": 10, "y": 1, "z": 6, "l": 0.2, "d": 0.2, "h": 0.2,
                         "api": "testAPI", "layer": "temp"}]
        },
        {
            "name": "First", "y": 3.5, "l": 20, "d": 12,
            "floors": [{"l": 20, "d": 12, "h": 0.2}]
        }
    ]
}"#;

fn office() -> BuildingDescriptor {
    parse_descriptor_str(OFFICE).unwrap()
}

#[test]
fn single_slab_is_a_floor_tagged_wall() {
    let d = parse_descriptor_str(
        r#"{"l": 10, "d": 10, "h": 3, "floors": [{"l": 10, "d": 10, "floors": [{"l": 10, "d": 10, "h": 0.2}]}]}"#,
    )
    .unwrap();
    let built = build_with_scale(&d, Scale::identity());
    let walls: Vec<_> = built.building.walls().collect();
    assert_eq!(walls.len(), 1);
    assert!(walls[0].has_tag("floor"));
    assert_eq!(walls[0].main_side, FaceKind::Top);
}

#[test]
fn slab_and_front_wall_scenario() {
    let d = parse_descriptor_str(
        r#"{"l": 10, "d": 6, "h": 3, "floors": [{"x": 0, "y": 0, "z": 0, "l": 10, "d": 6,
            "floors": [{"x": 0, "y": 0, "z": 0, "l": 10, "d": 6, "h": 0.2, "o": "we"}],
            "walls": {"outer": [{"x": 0, "y": 0, "z": 0, "l": 10, "d": 0.2, "h": 3, "o": "we"}],
                      "inner": []}}]}"#,
    )
    .unwrap();
    let built = build_scene(&d, Viewport::default());
    let b = &built.building;
    assert_eq!(b.floors.len(), 1);
    assert_eq!(b.wall_count(), 2);

    let slabs: Vec<_> = b.walls().filter(|w| w.has_tag("floor")).collect();
    assert_eq!(slabs.len(), 1);
    let outer: Vec<_> = b
        .walls()
        .filter(|w| built.lookup.lookup(w.id).map(|at| at.group) == Some(BoxGroup::OuterWalls))
        .collect();
    assert_eq!(outer.len(), 1);
    assert!(outer[0].has_tag("outer-front"));
}

#[test]
fn oversized_polling_interval_does_not_break_the_viewer() {
    let d = parse_descriptor_str(
        r#"{"l": 10, "d": 6, "h": 3, "floors": [{"name": "Ground", "l": 10, "d": 6,
            "sensors": [{"x": 5, "y": 1, "z": 3, "l": 0.2, "d": 0.2, "h": 0.2, "api": "testAPI",
                         "pollingInterval": 1e20},
                        {"x": 2, "y": 1, "z": 3, "l": 0.2, "d": 0.2, "h": 0.2, "api": "testAPI",
                         "pollingInterval": 1e19}]}]}"#,
    )
    .unwrap();
    let mut editor = Editor::new(d, &ViewerConfig::default());
    editor.select_floor("Ground");
    assert_eq!(editor.sensors().active_count(), 2);

    let now = std::time::Instant::now();
    assert_eq!(editor.tick(now, &TestSource), 2);
    assert_eq!(editor.tick(now + std::time::Duration::from_secs(60), &TestSource), 0);
}

#[test]
fn front_outer_wall_is_classified() {
    let built = build_with_scale(&office(), Scale::identity());
    let front = built
        .building
        .walls()
        .find(|w| w.has_tag("brick"))
        .unwrap();
    assert!(front.has_tag("outer-front"));
    assert!(!front.has_tag("outer-back"));
    assert_eq!(built.building.stylesheet, ".brick{background: brown}");
}

#[test]
fn corner_walls_get_two_edge_tags() {
    let built = build_with_scale(&office(), Scale::identity());
    let right = built
        .building
        .walls()
        .find(|w| w.has_tag("outer-right"))
        .unwrap();
    assert!(right.has_tag("outer-back"));
}

#[test]
fn selecting_a_floor_resets_yaw() {
    let mut e = Editor::new(office(), &ViewerConfig::default());
    for _ in 0..3 {
        e.rotate_left();
    }
    assert_eq!(e.scene().state().yaw, 135);
    e.select_floor("Ground");
    assert_eq!(e.scene().state().yaw, 0);
    assert_eq!(e.scene().state().pitch, Pitch::Normal);
}

#[test]
fn top_view_wins_over_other_words() {
    let mut e = Editor::new(office(), &ViewerConfig::default());
    e.set_view("back right top");
    assert_eq!(e.scene().state().pitch, Pitch::TopDown);
    assert_eq!(e.scene().state().yaw, 0);
}

#[test]
fn rebuilding_is_deterministic() {
    let viewport = Viewport::default();
    let a = build_scene(&office(), viewport);
    let b = build_scene(&office(), viewport);
    let sides = |s: &building_viewer::geometry::BuiltScene| {
        s.building
            .walls()
            .map(|w| (w.tags.to_string(), w.sides.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(sides(&a), sides(&b));
    assert_eq!(a.lookup.len(), b.lookup.len());
}

#[test]
fn rotating_twice_restores_descriptor() {
    let mut d = office();
    d.rotate();
    assert_ne!(d, office());
    d.rotate();
    assert_eq!(d, office());
}

#[test]
fn portrait_viewport_rotates_wide_building() {
    let config = ViewerConfig {
        viewport: Viewport::new(800.0, 1200.0),
        ..ViewerConfig::default()
    };
    let e = Editor::new(office(), &config);
    assert_eq!((e.descriptor().l, e.descriptor().d), (12.0, 20.0));
}

#[test]
fn layers_filter_sensor_walls() {
    let mut e = Editor::new(office(), &ViewerConfig::default());
    e.select_floor("Ground");
    let sensor_visible = |e: &Editor| e.scene().visible_walls().any(|w| w.has_tag("sensor"));
    assert!(!sensor_visible(&e));
    e.set_layer("temp");
    assert!(sensor_visible(&e));
    assert_eq!(e.sensors().active_count(), 1);
    e.set_layer("all");
    assert!(!sensor_visible(&e));
    assert_eq!(e.sensors().active_count(), 0);
}

#[test]
fn plan_mode_culls_walls_facing_the_camera() {
    let mut e = Editor::new(office(), &ViewerConfig::default());
    e.select_floor("Ground");
    let visible = |e: &Editor, tag: &str| e.scene().visible_walls().any(|w| w.has_tag(tag));
    assert!(!visible(&e, "outer-front"));
    assert!(visible(&e, "outer-back"));
    e.set_view("back");
    assert!(visible(&e, "outer-front"));
    assert!(!visible(&e, "outer-back"));
    e.tilt_up();
    assert!(visible(&e, "outer-front"));
    assert!(visible(&e, "outer-back"));
}

#[test]
fn edits_keep_the_descriptor_link() {
    let mut e = Editor::new(office(), &ViewerConfig::default());
    let at = DescriptorRef {
        floor: 0,
        group: BoxGroup::InnerWalls,
        index: 0,
    };
    let inner = e.wall_for(&at).unwrap();
    assert!(e.scene().is_visible(inner));
    let edited = e.edit(inner, &BoxEdit::L(5.0)).unwrap();
    assert_eq!(e.descriptor_for(edited).unwrap().l, 5.0);
    assert_eq!(e.descriptor().floors[0].walls.inner[0].l, 5.0);
    assert_eq!(e.descriptor_ref(edited), Some(at));
}

#[test]
fn empty_descriptor_builds_nothing() {
    let (scene, diff) = Scene::new(
        build_scene(&BuildingDescriptor::default(), Viewport::default()).building,
        "",
        "",
    );
    assert!(diff.is_empty());
    assert_eq!(scene.visible_walls().count(), 0);
}
