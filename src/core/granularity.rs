use crate::core::duration::{DAY_MS, Duration, HOUR_MS};
use crate::core::time_range::TimeRange;

/// Picks the bucket size for a time split from the span of the filtered range.
///
/// More than six days buckets by day, more than twelve hours by hour, and
/// anything shorter by minute. Both thresholds are strict.
#[must_use]
pub fn select_granularity(range: TimeRange) -> Duration {
    let span = range.span_ms();
    if span > 6 * DAY_MS {
        Duration::day()
    } else if span > 12 * HOUR_MS {
        Duration::hour()
    } else {
        Duration::minute()
    }
}
