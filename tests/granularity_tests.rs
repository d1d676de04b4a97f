use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use timeseries_panel::core::{Duration, TimeRange, select_granularity};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0)
        .single()
        .expect("valid start")
}

fn range_of(span: TimeDelta) -> TimeRange {
    TimeRange::new(start(), start() + span).expect("valid range")
}

#[test]
fn week_long_span_buckets_by_day() {
    assert_eq!(select_granularity(range_of(TimeDelta::days(7))), Duration::day());
}

#[test]
fn thirteen_hour_span_buckets_by_hour() {
    assert_eq!(
        select_granularity(range_of(TimeDelta::hours(13))),
        Duration::hour()
    );
}

#[test]
fn half_hour_span_buckets_by_minute() {
    assert_eq!(
        select_granularity(range_of(TimeDelta::minutes(30))),
        Duration::minute()
    );
}

#[test]
fn exactly_six_days_stays_hourly() {
    assert_eq!(select_granularity(range_of(TimeDelta::days(6))), Duration::hour());
    assert_eq!(
        select_granularity(range_of(TimeDelta::days(6) + TimeDelta::milliseconds(1))),
        Duration::day()
    );
}

#[test]
fn exactly_twelve_hours_stays_minutely() {
    assert_eq!(
        select_granularity(range_of(TimeDelta::hours(12))),
        Duration::minute()
    );
    assert_eq!(
        select_granularity(range_of(TimeDelta::hours(12) + TimeDelta::milliseconds(1))),
        Duration::hour()
    );
}

#[test]
fn empty_range_buckets_by_minute() {
    assert_eq!(select_granularity(range_of(TimeDelta::zero())), Duration::minute());
}

#[test]
fn inverted_range_is_rejected() {
    let err = TimeRange::new(start(), start() - TimeDelta::hours(1)).expect_err("end < start");
    assert!(format!("{err}").contains("precedes"));
}

#[test]
fn selected_durations_render_as_iso_spans() {
    assert_eq!(Duration::day().to_string(), "P1D");
    assert_eq!(Duration::hour().to_string(), "PT1H");
    assert_eq!(Duration::minute().to_string(), "PT1M");
}

proptest! {
    #[test]
    fn granularity_never_gets_finer_as_span_grows(
        shorter_ms in 0i64..30 * 86_400_000,
        extra_ms in 0i64..30 * 86_400_000,
    ) {
        let shorter = select_granularity(range_of(TimeDelta::milliseconds(shorter_ms)));
        let longer = select_granularity(range_of(TimeDelta::milliseconds(shorter_ms + extra_ms)));
        prop_assert!(longer.canonical_length_ms() >= shorter.canonical_length_ms());
    }
}
