pub mod descriptor;
pub mod loader;

pub use crate::error::DescriptorError;
pub use descriptor::{
    BoxDescriptor, BoxGroup, BuildingDescriptor, DescriptorRef, FloorDescriptor, Orientation,
    SensorDescriptor, StyleRule, WallGroups,
};
pub use loader::{parse_descriptor_file, parse_descriptor_str};
