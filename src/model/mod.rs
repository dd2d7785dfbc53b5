pub mod building;
pub mod floor;
pub mod side;
pub mod wall;

pub use building::Building;
pub use floor::Floor;
pub use side::{Axis, FaceKind, Placement, Rotation, Side};
pub use wall::{BoxExtent, Presence, Tags, Wall, WallDraft, WallId};
