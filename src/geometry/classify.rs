//! Positional tagging of walls against their floor's edges.

use crate::model::{Floor, WallDraft};

/// Whether a wall belongs to the building shell or the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    Outer,
    Inner,
}

impl EdgeClass {
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            EdgeClass::Outer => "outer",
            EdgeClass::Inner => "inner",
        }
    }
}

/// Edge tags (`outer-left`, `inner-back`, ...) for a box on a floor.
///
/// Each edge is tested on its own, so a corner wall gets two tags.
#[must_use]
pub fn edge_tags(floor: &Floor, draft: &WallDraft, class: EdgeClass) -> Vec<String> {
    let b = &draft.extent;
    let edges = [
        ("left", floor.is_on_left(b)),
        ("right", floor.is_on_right(b)),
        ("front", floor.is_on_front(b)),
        ("back", floor.is_on_back(b)),
    ];
    edges
        .into_iter()
        .filter(|(_, on_edge)| *on_edge)
        .map(|(edge, _)| format!("{}-{edge}", class.prefix()))
        .collect()
}

/// Returns the draft with its edge tags added.
#[must_use]
pub fn classify(floor: &Floor, draft: WallDraft, class: EdgeClass) -> WallDraft {
    let tags = edge_tags(floor, &draft, class).join(" ");
    draft.with_tags(&tags)
}
