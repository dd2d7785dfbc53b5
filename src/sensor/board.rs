use crate::model::{Building, Wall, WallId};
use crate::sensor::{MetricSource, SensorSpec};
use crate::view::VisibilityDiff;
use std::collections::HashMap;
use std::time::Instant;

const LOADING: &str = "loading...";

/// What a sensor wall currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    pub text: String,
    pub state: Option<String>,
}

impl Default for Readout {
    fn default() -> Self {
        Self {
            text: LOADING.to_string(),
            state: None,
        }
    }
}

#[derive(Debug)]
struct Poller {
    spec: SensorSpec,
    /// `None` once the next poll lies beyond what `Instant` can represent.
    next_due: Option<Instant>,
    readout: Readout,
}

/// One poller per visible sensor wall.
///
/// Pollers start when their wall enters the visible set and are dropped
/// when it leaves, so switching views never leaves a stale timer behind.
#[derive(Debug, Default)]
pub struct SensorBoard {
    pollers: HashMap<WallId, Poller>,
}

impl SensorBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a visibility change: stops pollers of hidden walls first,
    /// then starts pollers for newly shown sensor walls.
    pub fn sync(&mut self, diff: &VisibilityDiff, building: &Building, now: Instant) {
        for id in &diff.hidden {
            self.stop(*id);
        }
        for wall in diff.shown.iter().filter_map(|id| building.wall(*id)) {
            self.start(wall, now);
        }
    }

    /// Starts polling a sensor wall; other walls are ignored.
    pub fn start(&mut self, wall: &Wall, now: Instant) {
        if !wall.is_sensor() {
            return;
        }
        let Some(spec) = wall.sensor.clone() else {
            return;
        };
        tracing::debug!(wall = ?wall.id, api = %spec.api, "Starting sensor poller");
        self.pollers.insert(
            wall.id,
            Poller {
                spec,
                next_due: Some(now),
                readout: Readout::default(),
            },
        );
    }

    pub fn stop(&mut self, wall: WallId) {
        if self.pollers.remove(&wall).is_some() {
            tracing::debug!(?wall, "Stopped sensor poller");
        }
    }

    pub fn clear(&mut self) {
        self.pollers.clear();
    }

    /// Polls every poller that is due and returns how many were polled.
    ///
    /// A failed fetch keeps the previous readout; every poll, successful or
    /// not, is rescheduled one interval later. A poller whose next poll would
    /// overflow `Instant` is never due again.
    pub fn tick(&mut self, now: Instant, source: &dyn MetricSource) -> usize {
        let mut polled = 0;
        for (wall, poller) in &mut self.pollers {
            match poller.next_due {
                Some(due) if due <= now => {}
                _ => continue,
            }
            polled += 1;
            match source.fetch(&poller.spec) {
                Ok(metric) => {
                    poller.readout = Readout {
                        text: metric.value,
                        state: Some(metric.state),
                    };
                }
                Err(e) => {
                    tracing::warn!(?wall, api = %poller.spec.api, error = %e, "Sensor poll failed");
                }
            }
            poller.next_due = now.checked_add(poller.spec.polling_interval);
            if poller.next_due.is_none() {
                tracing::debug!(?wall, "Sensor poll interval out of range, not polling again");
            }
        }
        polled
    }

    #[must_use]
    pub fn readout(&self, wall: WallId) -> Option<&Readout> {
        self.pollers.get(&wall).map(|p| &p.readout)
    }

    #[must_use]
    pub fn is_active(&self, wall: WallId) -> bool {
        self.pollers.contains_key(&wall)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pollers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SensorError;
    use crate::geometry::{build_with_scale, Scale};
    use crate::parser::parse_descriptor_str;
    use crate::sensor::Metric;
    use std::cell::Cell;
    use std::time::Duration;

    struct Scripted {
        fail: bool,
        calls: Cell<usize>,
    }

    impl MetricSource for Scripted {
        fn fetch(&self, _sensor: &SensorSpec) -> Result<Metric, SensorError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(SensorError::InvalidResponse("offline".into()))
            } else {
                Ok(Metric::new("21", Some("C"), "normal".into()))
            }
        }
    }

    fn building() -> Building {
        let d = parse_descriptor_str(
            r#"{"l": 4, "d": 4, "h": 3, "floors": [{"l": 4, "d": 4,
                "items": [{"l": 1, "d": 1, "h": 1}],
                "sensors": [{"x": 1, "y": 1, "z": 1, "l": 0.2, "d": 0.2, "h": 0.2,
                             "api": "testAPI", "valueProperty": "v", "stateProperty": "s",
                             "pollingInterval": 5}]}]}"#,
        )
        .unwrap();
        build_with_scale(&d, Scale::identity()).building
    }

    fn ids(b: &Building) -> (WallId, WallId) {
        let walls: Vec<_> = b.walls().map(|w| w.id).collect();
        (walls[0], walls[1])
    }

    #[test]
    fn starts_only_sensor_walls() {
        let b = building();
        let (item, sensor) = ids(&b);
        let mut board = SensorBoard::new();
        let diff = VisibilityDiff {
            hidden: vec![],
            shown: vec![item, sensor],
        };
        board.sync(&diff, &b, Instant::now());
        assert!(board.is_active(sensor));
        assert!(!board.is_active(item));
        assert_eq!(board.readout(sensor).unwrap().text, "loading...");
    }

    #[test]
    fn hidden_walls_are_torn_down_before_restart() {
        let b = building();
        let (_, sensor) = ids(&b);
        let mut board = SensorBoard::new();
        let now = Instant::now();
        board.sync(&VisibilityDiff { hidden: vec![], shown: vec![sensor] }, &b, now);
        board.sync(&VisibilityDiff { hidden: vec![sensor], shown: vec![] }, &b, now);
        assert_eq!(board.active_count(), 0);
        board.sync(&VisibilityDiff { hidden: vec![sensor], shown: vec![sensor] }, &b, now);
        assert_eq!(board.active_count(), 1);
    }

    #[test]
    fn polls_on_schedule() {
        let b = building();
        let (_, sensor) = ids(&b);
        let mut board = SensorBoard::new();
        let start = Instant::now();
        board.start(b.wall(sensor).unwrap(), start);
        let source = Scripted { fail: false, calls: Cell::new(0) };

        assert_eq!(board.tick(start, &source), 1);
        assert_eq!(board.readout(sensor).unwrap().text, "21 C");
        assert_eq!(board.tick(start + Duration::from_secs(4), &source), 0);
        assert_eq!(board.tick(start + Duration::from_secs(5), &source), 1);
        assert_eq!(source.calls.get(), 2);
    }

    #[test]
    fn unrepresentable_interval_polls_once() {
        let d = parse_descriptor_str(
            r#"{"l": 4, "d": 4, "h": 3, "floors": [{"l": 4, "d": 4,
                "sensors": [{"l": 0.2, "d": 0.2, "h": 0.2, "api": "testAPI",
                             "pollingInterval": 1e19}]}]}"#,
        )
        .unwrap();
        let b = build_with_scale(&d, Scale::identity()).building;
        let sensor = b.walls().next().unwrap().id;
        let mut board = SensorBoard::new();
        let start = Instant::now();
        board.start(b.wall(sensor).unwrap(), start);
        let source = Scripted { fail: false, calls: Cell::new(0) };

        assert_eq!(board.tick(start, &source), 1);
        assert_eq!(board.tick(start + Duration::from_secs(3600), &source), 0);
        assert_eq!(board.readout(sensor).unwrap().text, "21 C");
        assert!(board.is_active(sensor));
    }

    #[test]
    fn failures_keep_last_value_and_retry() {
        let b = building();
        let (_, sensor) = ids(&b);
        let mut board = SensorBoard::new();
        let start = Instant::now();
        board.start(b.wall(sensor).unwrap(), start);
        board.tick(start, &Scripted { fail: false, calls: Cell::new(0) });

        let failing = Scripted { fail: true, calls: Cell::new(0) };
        let later = start + Duration::from_secs(5);
        assert_eq!(board.tick(later, &failing), 1);
        assert_eq!(board.readout(sensor).unwrap().state.as_deref(), Some("normal"));
        assert_eq!(board.tick(later + Duration::from_secs(5), &failing), 1);
        assert_eq!(failing.calls.get(), 2);
    }
}
