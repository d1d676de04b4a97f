use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Duration, Timezone};
use crate::model::{DataSource, Dimension};
use crate::query::{BucketAction, SortAction};

/// One split: a dimension, an optional bucketing rule and sort/limit policy.
///
/// Equality only looks at the dimension expression and the bucket action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitCombine {
    /// Dimension name; also the key the group value is exposed under.
    pub dimension: String,
    /// Attribute expression grouped on.
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_action: Option<BucketAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_action: Option<SortAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SplitCombine {
    #[must_use]
    pub fn new(dimension: &Dimension) -> Self {
        Self {
            dimension: dimension.name.clone(),
            expression: dimension.expression.clone(),
            bucket_action: None,
            sort_action: None,
            limit: None,
        }
    }

    /// Split on `dimension` bucketed by `duration` in `timezone`.
    #[must_use]
    pub fn time(dimension: &Dimension, duration: Duration, timezone: Timezone) -> Self {
        Self::new(dimension).with_bucket_action(BucketAction::time_bucket(duration, timezone))
    }

    #[must_use]
    pub fn with_bucket_action(mut self, bucket_action: BucketAction) -> Self {
        self.bucket_action = Some(bucket_action);
        self
    }

    #[must_use]
    pub fn with_sort_action(mut self, sort_action: SortAction) -> Self {
        self.sort_action = Some(sort_action);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Copy with the bucket action swapped, sort and limit kept.
    #[must_use]
    pub fn change_bucket_action(&self, bucket_action: BucketAction) -> Self {
        self.clone().with_bucket_action(bucket_action)
    }

    /// Time bucket duration and timezone, when bucketed by time.
    #[must_use]
    pub fn time_bucket(&self) -> Option<(Duration, &Timezone)> {
        match &self.bucket_action {
            Some(BucketAction::TimeBucket { duration, timezone }) => Some((*duration, timezone)),
            _ => None,
        }
    }

    #[must_use]
    pub fn dimension<'a>(&self, data_source: &'a DataSource) -> Option<&'a Dimension> {
        data_source
            .dimension(&self.dimension)
            .or_else(|| data_source.dimension_by_expression(&self.expression))
    }
}

impl PartialEq for SplitCombine {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression && self.bucket_action == other.bucket_action
    }
}

impl fmt::Display for SplitCombine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.expression)?;
        if let Some(bucket_action) = &self.bucket_action {
            write!(f, ".{bucket_action}")?;
        }
        Ok(())
    }
}
