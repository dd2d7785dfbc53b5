//! Expanding a descriptor tree into a [`Building`].

use crate::config::Viewport;
use crate::geometry::classify::{classify, EdgeClass};
use crate::geometry::lookup::ProjectionLookup;
use crate::geometry::scale::Scale;
use crate::model::{Building, Floor, WallDraft};
use crate::parser::{BoxDescriptor, BoxGroup, BuildingDescriptor, DescriptorRef, FloorDescriptor};
use crate::sensor::SensorSpec;

/// A building together with the map back to its descriptors.
#[derive(Debug)]
pub struct BuiltScene {
    pub building: Building,
    pub lookup: ProjectionLookup,
}

/// Builds the scene, fitting it into `viewport`.
#[must_use]
pub fn build_scene(descriptor: &BuildingDescriptor, viewport: Viewport) -> BuiltScene {
    build_with_scale(descriptor, Scale::for_descriptor(descriptor, viewport))
}

/// Builds the scene with an explicit scale.
///
/// Floors are visited in order; within a floor the lists go slabs,
/// ceilings, outer walls, inner walls, windows, glass, items, sensors.
#[must_use]
pub fn build_with_scale(descriptor: &BuildingDescriptor, scale: Scale) -> BuiltScene {
    let t = |v: f64| scale.apply(v);
    let mut building = Building::new(
        descriptor.name.clone(),
        t(descriptor.l),
        t(descriptor.h),
        t(descriptor.d),
        scale,
    );
    building.stylesheet = descriptor.stylesheet();
    let mut lookup = ProjectionLookup::new();

    for (floor_index, f) in descriptor.floors.iter().enumerate() {
        let level = building.add_floor((t(f.x), t(f.y), t(f.z)), t(f.l), t(f.d), f.name().to_string());

        for group in BoxGroup::ALL {
            for index in 0..f.len(group) {
                let Some(draft) = expand(&building.floors[level], f, group, index, scale) else {
                    continue;
                };
                let id = building.insert_wall(draft);
                lookup.insert(
                    id,
                    DescriptorRef {
                        floor: floor_index,
                        group,
                        index,
                    },
                );
            }
        }
    }

    tracing::debug!(
        name = %building.name,
        floors = building.floors.len(),
        walls = building.wall_count(),
        ratio = scale.ratio,
        unit = %scale.unit,
        "Built scene"
    );

    BuiltScene { building, lookup }
}

fn expand(
    floor: &Floor,
    source: &FloorDescriptor,
    group: BoxGroup,
    index: usize,
    scale: Scale,
) -> Option<WallDraft> {
    let shape = source.shape(group, index)?;
    let t = |v: f64| scale.apply(v);
    let class = shape.class.as_deref().unwrap_or_default();

    let draft = match group {
        BoxGroup::FloorSlabs => floor.add_floor(t(shape.x), t(shape.y), t(shape.z), t(shape.l), t(shape.h), t(shape.d)),
        BoxGroup::Ceilings => floor.add_ceiling(t(shape.x), t(shape.y), t(shape.z), t(shape.l), t(shape.h), t(shape.d)),
        BoxGroup::OuterWalls => classify(floor, oriented(floor, shape, scale, Floor::add_wall), EdgeClass::Outer),
        BoxGroup::InnerWalls | BoxGroup::Items => {
            classify(floor, oriented(floor, shape, scale, Floor::add_wall), EdgeClass::Inner)
        }
        BoxGroup::Windows => classify(floor, oriented(floor, shape, scale, Floor::add_window), EdgeClass::Outer),
        BoxGroup::Glass => classify(floor, oriented(floor, shape, scale, Floor::add_glass), EdgeClass::Inner),
        BoxGroup::Sensors => {
            let sensor = source.sensors.get(index)?;
            let draft = floor
                .add_wall(
                    t(shape.x - shape.l / 2.0),
                    t(shape.y - shape.h / 2.0),
                    t(shape.z - shape.d / 2.0),
                    t(shape.l),
                    t(shape.h),
                    t(shape.d),
                )
                .with_tags(class)
                .with_tags("sensor")
                .on_layer(sensor.layer.as_deref());
            let draft = if sensor.outside == Some(true) {
                draft.only_on_3d()
            } else {
                draft.only_on_plan()
            };
            return Some(draft.with_sensor(SensorSpec::from(sensor)));
        }
    };
    Some(draft.with_tags(class))
}

/// Expands a box whose `l`/`d` follow its orientation.
fn oriented(
    floor: &Floor,
    shape: &BoxDescriptor,
    scale: Scale,
    add: fn(&Floor, f64, f64, f64, f64, f64, f64) -> WallDraft,
) -> WallDraft {
    let (width, depth) = shape.planar_extent();
    add(
        floor,
        scale.apply(shape.x),
        scale.apply(shape.y),
        scale.apply(shape.z),
        scale.apply(width),
        scale.apply(shape.h),
        scale.apply(depth),
    )
}
