//! Fitting the whole building into the viewport.

use crate::config::Viewport;
use crate::parser::BuildingDescriptor;
use serde::Serialize;
use std::fmt;

/// Share of the constraining viewport dimension the building may occupy.
const VIEWPORT_SHARE: f64 = 80.0;

/// Viewport-relative length unit placements are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Percent of viewport width; the building is width-constrained.
    #[default]
    Vw,
    /// Percent of viewport height; the building is height-constrained.
    Vh,
}

impl LengthUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Vw => "vw",
            LengthUnit::Vh => "vh",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One global length-to-viewport ratio for a build pass.
///
/// Passed by value into every box expansion; never stored as shared state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub ratio: f64,
    pub unit: LengthUnit,
}

impl Scale {
    /// Scale that keeps descriptor lengths unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            ratio: 1.0,
            unit: LengthUnit::Vw,
        }
    }

    /// Picks the ratio so the building spans 80% of whichever viewport
    /// dimension constrains it. The taller of height and depth counts as
    /// the vertical extent since the plan view shows depth vertically.
    ///
    /// A building without extent keeps a ratio of 1.
    #[must_use]
    pub fn fit(length: f64, depth: f64, height: f64, viewport: Viewport) -> Self {
        let vertical = height.max(depth);
        let (ratio, unit) = if viewport.width / length < viewport.height / vertical {
            (VIEWPORT_SHARE / length, LengthUnit::Vw)
        } else {
            (VIEWPORT_SHARE / vertical, LengthUnit::Vh)
        };
        let ratio = if ratio.is_finite() { ratio } else { 1.0 };
        Self { ratio, unit }
    }

    #[must_use]
    pub fn for_descriptor(descriptor: &BuildingDescriptor, viewport: Viewport) -> Self {
        Self::fit(descriptor.l, descriptor.d, descriptor.h, viewport)
    }

    /// Converts a descriptor length into placement units.
    #[must_use]
    pub fn apply(&self, length: f64) -> f64 {
        length * self.ratio
    }
}

/// Whether the descriptor must be rotated so its long axis follows the
/// viewport's long axis.
#[must_use]
pub fn should_rotate(viewport: Viewport, descriptor: &BuildingDescriptor) -> bool {
    viewport.is_portrait() != (descriptor.l < descriptor.d)
}
