pub mod builder;
pub mod classify;
pub mod lookup;
pub mod scale;

pub use builder::{build_scene, build_with_scale, BuiltScene};
pub use classify::{classify, edge_tags, EdgeClass};
pub use lookup::ProjectionLookup;
pub use scale::{should_rotate, LengthUnit, Scale};
