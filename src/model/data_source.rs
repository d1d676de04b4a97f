use serde::{Deserialize, Serialize};

use crate::model::{Dimension, Measure};

fn default_time_attribute() -> String {
    "time".to_owned()
}

/// Read-only description of a dataset the panel can query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    pub name: String,
    pub title: String,
    /// Name of the dimension that carries event time.
    #[serde(default = "default_time_attribute")]
    pub time_attribute: String,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub measures: Vec<Measure>,
}

impl DataSource {
    #[must_use]
    pub fn new(name: impl Into<String>, dimensions: Vec<Dimension>, measures: Vec<Measure>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            time_attribute: default_time_attribute(),
            dimensions,
            measures,
        }
    }

    #[must_use]
    pub fn with_time_attribute(mut self, time_attribute: impl Into<String>) -> Self {
        self.time_attribute = time_attribute.into();
        self
    }

    #[must_use]
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|dimension| dimension.name == name)
    }

    #[must_use]
    pub fn dimension_by_expression(&self, expression: &str) -> Option<&Dimension> {
        self.dimensions
            .iter()
            .find(|dimension| dimension.expression == expression)
    }

    #[must_use]
    pub fn time_dimension(&self) -> Option<&Dimension> {
        self.dimension(&self.time_attribute)
    }

    #[must_use]
    pub fn measure(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|measure| measure.name == name)
    }
}
