use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::select_granularity;
use crate::model::{DataSource, Dimension, Filter, SplitCombine};
use crate::query::BucketAction;

static EMPTY: LazyLock<Splits> = LazyLock::new(|| Splits {
    combines: Arc::from(Vec::new()),
});

/// Immutable, ordered list of splits.
///
/// Index 0 is the outermost grouping and the last split is the leaf the
/// time axis is drawn from. Every edit returns a new value. Operations that
/// change nothing hand back a clone sharing the same storage, so
/// [`Splits::ptr_eq`] works as a cheap "did anything change" check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<SplitCombine>", into = "Vec<SplitCombine>")]
pub struct Splits {
    combines: Arc<[SplitCombine]>,
}

impl Splits {
    /// Shared empty list.
    #[must_use]
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    #[must_use]
    pub fn from_split_combine(combine: SplitCombine) -> Self {
        Self::from_vec(vec![combine])
    }

    #[must_use]
    pub fn from_vec(combines: Vec<SplitCombine>) -> Self {
        if combines.is_empty() {
            return Self::empty();
        }
        Self {
            combines: Arc::from(combines),
        }
    }

    /// True when both values share storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.combines, &other.combines)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SplitCombine] {
        &self.combines
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<SplitCombine> {
        self.combines.to_vec()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SplitCombine> {
        self.combines.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.combines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combines.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&SplitCombine> {
        self.combines.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&SplitCombine> {
        self.combines.last()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SplitCombine> {
        self.combines.get(index)
    }

    #[must_use]
    pub fn add_split(&self, combine: SplitCombine) -> Self {
        let mut combines = self.to_vec();
        combines.push(combine);
        Self::from_vec(combines)
    }

    /// Drops every split equal to `combine`.
    #[must_use]
    pub fn remove_split(&self, combine: &SplitCombine) -> Self {
        if !self.combines.contains(combine) {
            return self.clone();
        }
        Self::from_vec(
            self.combines
                .iter()
                .filter(|existing| *existing != combine)
                .cloned()
                .collect(),
        )
    }

    /// Swaps every split equal to `search` for `replacement`.
    #[must_use]
    pub fn replace(&self, search: &SplitCombine, replacement: SplitCombine) -> Self {
        if !self.combines.contains(search) {
            return self.clone();
        }
        Self::from_vec(
            self.combines
                .iter()
                .map(|existing| {
                    if existing == search {
                        replacement.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect(),
        )
    }

    /// Replaces the split at `index`; `index == len()` appends.
    ///
    /// Indexes past the end leave the list unchanged.
    #[must_use]
    pub fn replace_by_index(&self, index: usize, replacement: SplitCombine) -> Self {
        if index == self.len() {
            return self.add_split(replacement);
        }
        if index > self.len() {
            return self.clone();
        }
        let mut combines = self.to_vec();
        combines[index] = replacement;
        Self::from_vec(combines)
    }

    /// Inserts before `index`; indexes past the end append.
    #[must_use]
    pub fn insert_by_index(&self, index: usize, insert: SplitCombine) -> Self {
        let mut combines = self.to_vec();
        combines.insert(index.min(combines.len()), insert);
        Self::from_vec(combines)
    }

    #[must_use]
    pub fn splits_on_dimension(&self, dimension: &Dimension) -> bool {
        self.combines
            .iter()
            .any(|combine| combine.expression == dimension.expression)
    }

    /// Comma-joined titles of the split dimensions.
    #[must_use]
    pub fn title(&self, data_source: &DataSource) -> String {
        self.combines
            .iter()
            .map(|combine| {
                combine
                    .dimension(data_source)
                    .map_or_else(|| combine.dimension.clone(), |dimension| dimension.title.clone())
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Re-buckets a lone time split to the granularity the filter calls for.
    ///
    /// Returns `self` (sharing storage) when there is not exactly one split,
    /// when that split is not time-bucketed, when the filter has no range on
    /// the time dimension, or when the bucket already has the right duration.
    #[must_use]
    pub fn update_with_filter(&self, data_source: &DataSource, filter: &Filter) -> Self {
        let [time_split] = &*self.combines else {
            return self.clone();
        };
        let Some((duration, timezone)) = time_split.time_bucket() else {
            return self.clone();
        };
        let Some(time_dimension) = data_source.time_dimension() else {
            return self.clone();
        };
        let Some(range) = filter.time_range(&time_dimension.expression) else {
            return self.clone();
        };

        let granularity = select_granularity(range);
        if duration == granularity {
            return self.clone();
        }

        debug!(
            dimension = %time_split.dimension,
            from = %duration,
            to = %granularity,
            span_ms = range.span_ms(),
            "re-bucketing time split for filter"
        );
        Self::from_split_combine(
            time_split.change_bucket_action(BucketAction::time_bucket(granularity, timezone.clone())),
        )
    }
}

impl Default for Splits {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Splits {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.combines == other.combines
    }
}

impl From<Vec<SplitCombine>> for Splits {
    fn from(combines: Vec<SplitCombine>) -> Self {
        Self::from_vec(combines)
    }
}

impl From<Splits> for Vec<SplitCombine> {
    fn from(splits: Splits) -> Self {
        splits.to_vec()
    }
}

impl<'a> IntoIterator for &'a Splits {
    type Item = &'a SplitCombine;
    type IntoIter = std::slice::Iter<'a, SplitCombine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Splits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, combine) in self.combines.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{combine}")?;
        }
        Ok(())
    }
}
