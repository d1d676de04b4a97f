use chrono::{DateTime, Utc};

use crate::model::Splits;
use crate::query::{Dataset, Datum};

const VALUE_PADDING_FACTOR: f64 = 1.1;

/// Bucket rows of the leaf split, reached through the first group of every
/// outer level.
///
/// `None` when there are no splits or the nesting stops early.
#[must_use]
pub fn leaf_dataset<'a>(dataset: &'a Dataset, splits: &Splits) -> Option<&'a Dataset> {
    if splits.is_empty() {
        return None;
    }
    dataset.first_descendant(splits.len())
}

/// Time domain covered by the leaf buckets: first bucket start to last bucket end.
#[must_use]
pub fn time_extent(
    leaf_rows: &Dataset,
    split_dimension: &str,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = leaf_rows.first()?.time_range(split_dimension)?;
    let last = leaf_rows.last()?.time_range(split_dimension)?;

    let start = first.start().min(last.end());
    let end = first.start().max(last.end());
    Some((start, end))
}

/// Min/max of a measure over rows, skipping missing and non-finite values.
///
/// `None` means there is nothing to plot yet.
#[must_use]
pub fn measure_extent(rows: &[Datum], measure_name: &str) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in rows
        .iter()
        .filter_map(|row| row.number(measure_name))
        .filter(|value| value.is_finite())
    {
        min = min.min(value);
        max = max.max(value);
    }

    if min.is_finite() { Some((min, max)) } else { None }
}

/// Grows the extent by 10% away from zero and forces it to contain zero.
#[must_use]
pub fn pad_value_extent(extent: (f64, f64)) -> (f64, f64) {
    (
        (extent.0 * VALUE_PADDING_FACTOR).min(0.0),
        (extent.1 * VALUE_PADDING_FACTOR).max(0.0),
    )
}

/// Drops the zero tick, then every other remaining tick.
#[must_use]
pub fn filter_value_ticks(ticks: Vec<f64>) -> Vec<f64> {
    ticks
        .into_iter()
        .filter(|tick| *tick != 0.0)
        .enumerate()
        .filter(|(index, _)| index % 2 == 0)
        .map(|(_, tick)| tick)
        .collect()
}
