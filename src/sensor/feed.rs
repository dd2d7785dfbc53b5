use crate::error::SensorError;
use crate::sensor::SensorSpec;
use rand::Rng;
use serde_json::Value;
use std::time::Duration;

/// `api` value that selects the built-in random source.
pub const TEST_API: &str = "testAPI";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One reading: formatted value text and a state name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub value: String,
    pub state: String,
}

impl Metric {
    /// Joins a raw value and an optional unit.
    #[must_use]
    pub fn new(raw: &str, unit: Option<&str>, state: String) -> Self {
        let value = format!("{raw} {}", unit.unwrap_or_default()).trim().to_string();
        Self { value, state }
    }
}

/// Where readings come from.
pub trait MetricSource {
    fn fetch(&self, sensor: &SensorSpec) -> Result<Metric, SensorError>;
}

/// Random readings for trying out layouts without a backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestSource;

impl MetricSource for TestSource {
    fn fetch(&self, sensor: &SensorSpec) -> Result<Metric, SensorError> {
        let raw: f64 = rand::thread_rng().gen_range(0.0..100.0);
        let value = (raw * 100.0).round() / 100.0;
        tracing::trace!(api = %sensor.api, value, "Test sensor reading");
        Ok(Metric::new(&format!("{value:.2}"), sensor.unit.as_deref(), state_for(value).to_string()))
    }
}

fn state_for(value: f64) -> &'static str {
    if value < 40.0 {
        "normal"
    } else if value < 80.0 {
        "warning"
    } else {
        "critical"
    }
}

/// Reads `valueProperty` and `stateProperty` from a JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    agent: ureq::Agent,
}

impl Default for HttpSource {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }
}

impl MetricSource for HttpSource {
    fn fetch(&self, sensor: &SensorSpec) -> Result<Metric, SensorError> {
        let body: Value = self
            .agent
            .get(&sensor.api)
            .call()
            .map_err(|e| SensorError::Request {
                api: sensor.api.clone(),
                message: e.to_string(),
            })?
            .into_json()
            .map_err(|e| SensorError::InvalidResponse(e.to_string()))?;
        metric_from_json(sensor, &body)
    }
}

/// Extracts a metric from a response body.
pub fn metric_from_json(sensor: &SensorSpec, body: &Value) -> Result<Metric, SensorError> {
    let field = |name: &str| -> Result<String, SensorError> {
        match body.get(name) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Null) | None => Err(SensorError::MissingProperty(name.to_string())),
            Some(other) => Ok(other.to_string()),
        }
    };
    let value = field(&sensor.value_property)?;
    let state = field(&sensor.state_property)?;
    Ok(Metric::new(&value, sensor.unit.as_deref(), state))
}

/// Routes `testAPI` sensors to [`TestSource`] and everything else over HTTP.
#[derive(Debug, Default, Clone)]
pub struct DefaultSource {
    test: TestSource,
    http: HttpSource,
}

impl MetricSource for DefaultSource {
    fn fetch(&self, sensor: &SensorSpec) -> Result<Metric, SensorError> {
        if sensor.api == TEST_API {
            self.test.fetch(sensor)
        } else {
            self.http.fetch(sensor)
        }
    }
}
