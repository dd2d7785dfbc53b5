//! Viewer configuration: viewport size and the initial view parameters.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Size of the drawing surface in device pixels.
///
/// Only the aspect ratio matters to the geometry core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_portrait(&self) -> bool {
        self.width < self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

impl FromStr for Viewport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidViewport(s.to_string());
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width: f64 = w.trim().parse().map_err(|_| invalid())?;
        let height: f64 = h.trim().parse().map_err(|_| invalid())?;
        if !(width > 0.0 && height > 0.0) {
            return Err(invalid());
        }
        Ok(Self::new(width, height))
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Initial scene parameters.
///
/// `floor` and `layer` use the empty string for "none", matching what the
/// editor collaborator sends when a selection is cleared.
#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    pub viewport: Viewport,
    pub floor: String,
    pub layer: String,
    pub view: Option<String>,
}
