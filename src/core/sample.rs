use crate::core::{Channel, FieldValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One parsed CSV line: column name to coerced value.
///
/// Columns that were empty or missing on the line have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    fields: BTreeMap<String, FieldValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests
    pub fn with(mut self, column: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(column, value.into());
        self
    }

    pub fn insert(&mut self, column: &str, value: FieldValue) {
        self.fields.insert(column.to_string(), value);
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Numeric value of a column, `None` if absent or text
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(FieldValue::as_f64)
    }

    pub fn channel(&self, channel: Channel) -> Option<f64> {
        self.number(channel.column())
    }

    /// Whether the mandatory `time` field is present
    pub fn has_time(&self) -> bool {
        self.fields.contains_key(Channel::Time.column())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A telemetry sample ready for display: the original row plus GPS
/// coordinates rescaled into [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSample {
    #[serde(flatten)]
    pub row: RawRow,

    #[serde(rename = "latNorm")]
    pub lat_norm: f64,

    #[serde(rename = "longNorm")]
    pub long_norm: f64,
}

impl NormalizedSample {
    pub fn new(row: RawRow, lat_norm: f64, long_norm: f64) -> Self {
        Self {
            row,
            lat_norm,
            long_norm,
        }
    }

    /// Stand-in shown when there is no current sample (empty series).
    pub fn zero() -> Self {
        let row = RawRow::new()
            .with(Channel::Time.column(), 0.0)
            .with(Channel::Throttle.column(), 0.0)
            .with(Channel::Speed.column(), 0.0)
            .with(Channel::Rpm.column(), 0.0);
        Self::new(row, 0.0, 0.0)
    }

    /// Channel value for display; absent or non-numeric reads as 0
    pub fn value(&self, channel: Channel) -> f64 {
        self.row.channel(channel).unwrap_or(0.0)
    }

    pub fn time(&self) -> f64 {
        self.value(Channel::Time)
    }

    pub fn throttle(&self) -> f64 {
        self.value(Channel::Throttle)
    }

    pub fn speed(&self) -> f64 {
        self.value(Channel::Speed)
    }

    pub fn rpm(&self) -> f64 {
        self.value(Channel::Rpm)
    }

    /// Position on the normalized track map as `[x, y]` = `[longNorm, latNorm]`
    pub fn track_point(&self) -> [f64; 2] {
        [self.long_norm, self.lat_norm]
    }
}
