//! Key/value telemetry output.
//!
//! The machine publishes a snapshot of its state through a [`TelemetrySink`]
//! once at construction and once per `update()`. Each snapshot is exactly
//! two records, in this order:
//!
//! - `"<label>/State"`: the current state's name
//! - `"<label>/TimeInState"`: seconds since the last real state change

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A single telemetry value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TelemetryValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for TelemetryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TelemetryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for TelemetryValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Destination for telemetry records.
pub trait TelemetrySink {
    fn record(&mut self, key: &str, value: TelemetryValue);
}

/// Emits every record as a `tracing` event at TRACE level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn record(&mut self, key: &str, value: TelemetryValue) {
        tracing::trace!(target: "tickstate::telemetry", key = key, value = %value, "record");
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn record(&mut self, _key: &str, _value: TelemetryValue) {}
}

/// In-memory sink retaining every record in arrival order.
///
/// Clones share storage: keep one handle for inspection and give another
/// to the machine.
///
/// ```rust
/// use tickstate::telemetry::{MemorySink, TelemetrySink, TelemetryValue};
///
/// let sink = MemorySink::new();
/// let mut writer = sink.clone();
/// writer.record("Intake/State", TelemetryValue::from("Idle"));
///
/// assert_eq!(sink.latest("Intake/State"), Some(TelemetryValue::from("Idle")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Rc<RefCell<Vec<(String, TelemetryValue)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(String, TelemetryValue)> {
        self.records.borrow().clone()
    }

    /// Most recent value recorded under `key`.
    pub fn latest(&self, key: &str) -> Option<TelemetryValue> {
        self.records
            .borrow()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl TelemetrySink for MemorySink {
    fn record(&mut self, key: &str, value: TelemetryValue) {
        self.records.borrow_mut().push((key.to_string(), value));
    }
}

/// Precomputed telemetry keys for one machine.
#[derive(Clone, Debug)]
pub(crate) struct TelemetryKeys {
    pub state: String,
    pub time_in_state: String,
}

impl TelemetryKeys {
    pub fn new(label: &str) -> Self {
        Self {
            state: format!("{label}/State"),
            time_in_state: format!("{label}/TimeInState"),
        }
    }
}
