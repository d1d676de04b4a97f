use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::TimeRange;
use crate::error::{PanelError, PanelResult};

/// Single attribute value in a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Number(f64),
    TimeRange(TimeRange),
    Text(String),
}

impl Value {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_time_range(&self) -> Option<TimeRange> {
        match self {
            Self::TimeRange(range) => Some(*range),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<TimeRange> for Value {
    fn from(value: TimeRange) -> Self {
        Self::TimeRange(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Result row: attribute values plus the optional drill-down group of the
/// next split level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Datum {
    #[serde(rename = "Split", default, skip_serializing_if = "Option::is_none")]
    split: Option<Dataset>,
    #[serde(flatten)]
    values: IndexMap<String, Value>,
}

impl Datum {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_split(mut self, split: Dataset) -> Self {
        self.split = Some(split);
        self
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(Value::as_number)
    }

    #[must_use]
    pub fn time_range(&self, name: &str) -> Option<TimeRange> {
        self.value(name).and_then(Value::as_time_range)
    }

    #[must_use]
    pub fn split(&self) -> Option<&Dataset> {
        self.split.as_ref()
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Ordered result rows of one query level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<Datum>,
}

impl Dataset {
    #[must_use]
    pub fn new(rows: Vec<Datum>) -> Self {
        Self { rows }
    }

    pub fn from_json_str(input: &str) -> PanelResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PanelError::InvalidData(format!("failed to parse dataset json: {e}")))
    }

    pub fn to_json_pretty(&self) -> PanelResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PanelError::InvalidData(format!("failed to serialize dataset json: {e}")))
    }

    #[must_use]
    pub fn rows(&self) -> &[Datum] {
        &self.rows
    }

    #[must_use]
    pub fn first(&self) -> Option<&Datum> {
        self.rows.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Datum> {
        self.rows.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Follows the first row's drill-down `depth` times.
    ///
    /// `depth == 0` returns `self`. Missing groups yield `None`.
    #[must_use]
    pub fn first_descendant(&self, depth: usize) -> Option<&Dataset> {
        let mut current = self;
        for _ in 0..depth {
            current = current.first()?.split()?;
        }
        Some(current)
    }
}
