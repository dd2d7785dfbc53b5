//! The camera, floor and layer state machine and what it makes visible.

pub mod scene;
pub mod state;
pub mod transform;
pub mod visibility;

pub use scene::{Scene, VisibilityDiff};
pub use state::{Pitch, ViewState, ELEVATION_PIVOT, YAW_STEP};
pub use transform::BuildingTransform;
pub use visibility::{can_show_wall, is_floor_displayed, is_visible};
