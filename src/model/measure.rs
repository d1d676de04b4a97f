use serde::{Deserialize, Serialize};

use crate::model::dimension::make_title;
use crate::query::AggregateExpression;

pub const DEFAULT_MEASURE_FORMAT: &str = "0,0.0 a";

/// Read-only measure descriptor supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub title: String,
    pub expression: AggregateExpression,
    /// Display format hint; formatting itself happens in the host.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    DEFAULT_MEASURE_FORMAT.to_owned()
}

impl Measure {
    #[must_use]
    pub fn new(name: impl Into<String>, expression: AggregateExpression) -> Self {
        let name = name.into();
        Self {
            title: make_title(&name),
            name,
            expression,
            format: default_format(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}
