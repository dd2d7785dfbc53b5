//! Live readings for sensor walls.
//!
//! Polling is cooperative: the board is ticked from the owner's loop and
//! nothing runs in the background. A reading that fails to arrive never
//! affects the geometry; the wall keeps its last value.

pub mod board;
pub mod feed;

pub use board::{Readout, SensorBoard};
pub use feed::{DefaultSource, HttpSource, Metric, MetricSource, TestSource, TEST_API};

use crate::parser::SensorDescriptor;
use std::time::Duration;

/// What a sensor wall polls and how often.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSpec {
    pub outside: bool,
    pub api: String,
    pub value_property: String,
    pub state_property: String,
    pub unit: Option<String>,
    pub polling_interval: Duration,
}

impl From<&SensorDescriptor> for SensorSpec {
    fn from(d: &SensorDescriptor) -> Self {
        let seconds = if d.polling_interval.is_finite() && d.polling_interval > 0.0 {
            d.polling_interval
        } else {
            0.0
        };
        Self {
            outside: d.outside == Some(true),
            api: d.api.clone(),
            value_property: d.value_property.clone(),
            state_property: d.state_property.clone(),
            unit: d.unit.clone().filter(|u| !u.is_empty()),
            polling_interval: Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX),
        }
    }
}

/// CSS transform that turns a readout to face the camera at `yaw` degrees.
#[must_use]
pub fn overlay_transform(yaw: i32) -> String {
    format!(
        "rotate3d(0, 1, 0, -90deg) rotate3d(1, 0, 0, {}deg) rotate3d(0, 0, 1, 90deg)",
        yaw - 90
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_descriptor() {
        let mut d = SensorDescriptor::from_shape(crate::parser::BoxDescriptor::default());
        d.api = "https://example.test/t".into();
        d.unit = Some(String::new());
        let spec = SensorSpec::from(&d);
        assert_eq!(spec.polling_interval, Duration::from_secs(30));
        assert!(spec.unit.is_none());
        assert!(!spec.outside);
    }

    #[test]
    fn negative_interval_polls_every_tick() {
        let mut d = SensorDescriptor::from_shape(crate::parser::BoxDescriptor::default());
        d.polling_interval = -5.0;
        assert_eq!(SensorSpec::from(&d).polling_interval, Duration::ZERO);
    }

    #[test]
    fn huge_interval_saturates() {
        let mut d = SensorDescriptor::from_shape(crate::parser::BoxDescriptor::default());
        d.polling_interval = 1e20;
        assert_eq!(SensorSpec::from(&d).polling_interval, Duration::MAX);
    }

    #[test]
    fn overlay_follows_yaw() {
        assert_eq!(
            overlay_transform(45),
            "rotate3d(0, 1, 0, -90deg) rotate3d(1, 0, 0, -45deg) rotate3d(0, 0, 1, 90deg)"
        );
    }
}
