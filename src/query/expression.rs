//! Minimal aggregation-query vocabulary shared by the model and the composer.
//!
//! Values here only describe query shape. Execution belongs to the host's
//! dispatcher, which receives a [`Query`] and answers with a
//! [`Dataset`](crate::query::Dataset).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Duration, TimeRange, Timezone};

/// Reference name bound to the filtered input rows.
pub const MAIN_NAME: &str = "main";
/// Name under which each split level exposes its groups.
pub const SPLIT_NAME: &str = "Split";

/// Rule mapping a raw dimension value into a discrete bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BucketAction {
    TimeBucket {
        duration: Duration,
        #[serde(default)]
        timezone: Timezone,
    },
    NumberBucket {
        size: f64,
        #[serde(default)]
        offset: f64,
    },
}

impl BucketAction {
    #[must_use]
    pub fn time_bucket(duration: Duration, timezone: Timezone) -> Self {
        Self::TimeBucket { duration, timezone }
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::TimeBucket { duration, .. } => Some(*duration),
            Self::NumberBucket { .. } => None,
        }
    }

    #[must_use]
    pub fn timezone(&self) -> Option<&Timezone> {
        match self {
            Self::TimeBucket { timezone, .. } => Some(timezone),
            Self::NumberBucket { .. } => None,
        }
    }
}

impl fmt::Display for BucketAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeBucket { duration, timezone } => {
                write!(f, "timeBucket({duration}, {timezone})")
            }
            Self::NumberBucket { size, offset } => write!(f, "numberBucket({size}, {offset})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

/// Sort by a named attribute of the grouped rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortAction {
    pub reference: String,
    pub direction: SortDirection,
}

impl SortAction {
    #[must_use]
    pub fn ascending(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn descending(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            direction: SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregateFunction {
    Count,
    Sum,
    Min,
    Max,
    Average,
    CountDistinct,
}

impl AggregateFunction {
    const fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Average => "average",
            Self::CountDistinct => "countDistinct",
        }
    }
}

/// Aggregate over the rows in scope, e.g. `$main.sum($added)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateExpression {
    pub function: AggregateFunction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl AggregateExpression {
    #[must_use]
    pub fn count() -> Self {
        Self {
            function: AggregateFunction::Count,
            attribute: None,
        }
    }

    #[must_use]
    pub fn of(function: AggregateFunction, attribute: impl Into<String>) -> Self {
        Self {
            function,
            attribute: Some(attribute.into()),
        }
    }

    #[must_use]
    pub fn sum(attribute: impl Into<String>) -> Self {
        Self::of(AggregateFunction::Sum, attribute)
    }
}

impl fmt::Display for AggregateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(f, "${MAIN_NAME}.{}(${attribute})", self.function.name()),
            None => write!(f, "${MAIN_NAME}.{}()", self.function.name()),
        }
    }
}

/// Row predicate produced from a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Predicate {
    True,
    In {
        attribute: String,
        values: Vec<String>,
    },
    Within {
        attribute: String,
        range: TimeRange,
    },
    And {
        operands: Vec<Predicate>,
    },
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("true"),
            Self::In { attribute, values } => write!(f, "${attribute}.in([{}])", values.join(", ")),
            Self::Within { attribute, range } => write!(
                f,
                "${attribute}.in([{}, {}))",
                range.start().to_rfc3339(),
                range.end().to_rfc3339()
            ),
            Self::And { operands } => {
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        f.write_str(".and(")?;
                        write!(f, "{operand})")?;
                    } else {
                        write!(f, "{operand}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Named aggregate computed in the enclosing scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apply {
    pub name: String,
    pub expression: AggregateExpression,
}

/// Rows a split level groups over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SplitSource {
    /// The filtered `main` rows; used by the outermost level.
    Main,
    /// The rows of the enclosing level's current group.
    EnclosingGroup,
}

/// One grouping level; nested levels drill into each group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitLevel {
    pub source: SplitSource,
    /// Attribute expression grouped on.
    pub split_on: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<BucketAction>,
    /// Name the group key is exposed under in each result row.
    pub key: String,
    #[serde(default)]
    pub applies: Vec<Apply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<Box<SplitLevel>>,
}

impl SplitLevel {
    /// Nesting depth starting at this level.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.split.as_ref().map_or(0, |inner| inner.depth())
    }

    /// Level `index` steps below this one (0 is `self`).
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&SplitLevel> {
        let mut current = self;
        for _ in 0..index {
            current = current.split.as_deref()?;
        }
        Some(current)
    }
}

impl fmt::Display for SplitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${MAIN_NAME}.split(${}", self.split_on)?;
        if let Some(bucket) = &self.bucket {
            write!(f, ".{bucket}")?;
        }
        write!(f, ", {})", self.key)?;
        for apply in &self.applies {
            write!(f, ".apply({}, {})", apply.name, apply.expression)?;
        }
        if let Some(sort) = &self.sort {
            write!(f, ".sort(${}, {})", sort.reference, sort.direction)?;
        }
        if let Some(limit) = self.limit {
            write!(f, ".limit({limit})")?;
        }
        if let Some(inner) = &self.split {
            write!(f, ".apply({SPLIT_NAME}, {inner})")?;
        }
        Ok(())
    }
}

/// Complete nested aggregation query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Restriction applied to the full dataset and bound as `main`.
    pub filter: Predicate,
    #[serde(default)]
    pub applies: Vec<Apply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitLevel>,
}

impl Query {
    #[must_use]
    pub fn split_depth(&self) -> usize {
        self.split.as_ref().map_or(0, SplitLevel::depth)
    }

    /// Split level at `index`, outermost first.
    #[must_use]
    pub fn split_level(&self, index: usize) -> Option<&SplitLevel> {
        self.split.as_ref()?.level(index)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$().apply({MAIN_NAME}, ${MAIN_NAME}.filter({}))", self.filter)?;
        for apply in &self.applies {
            write!(f, ".apply({}, {})", apply.name, apply.expression)?;
        }
        if let Some(split) = &self.split {
            write!(f, ".apply({SPLIT_NAME}, {split})")?;
        }
        Ok(())
    }
}
