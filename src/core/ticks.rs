use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use crate::core::duration::{DAY_MS, HOUR_MS, MINUTE_MS, SECOND_MS, WEEK_MS};

const SQRT_50: f64 = 7.071_067_811_865_476;
const SQRT_10: f64 = 3.162_277_660_168_379_5;
const SQRT_2: f64 = std::f64::consts::SQRT_2;

// 1970-01-01 was a Thursday; weekly ticks start on Sundays.
const FIRST_SUNDAY_OFFSET_MS: i64 = 3 * DAY_MS;

const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Candidate time tick intervals, ordered by approximate length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeInterval {
    Fixed(i64),
    Week,
    Months(u32),
}

impl TimeInterval {
    const fn approx_ms(self) -> i64 {
        match self {
            Self::Fixed(step) => step,
            Self::Week => WEEK_MS,
            Self::Months(count) => count as i64 * MONTH_MS,
        }
    }
}

const TIME_INTERVALS: [TimeInterval; 17] = [
    TimeInterval::Fixed(SECOND_MS),
    TimeInterval::Fixed(5 * SECOND_MS),
    TimeInterval::Fixed(15 * SECOND_MS),
    TimeInterval::Fixed(30 * SECOND_MS),
    TimeInterval::Fixed(MINUTE_MS),
    TimeInterval::Fixed(5 * MINUTE_MS),
    TimeInterval::Fixed(15 * MINUTE_MS),
    TimeInterval::Fixed(30 * MINUTE_MS),
    TimeInterval::Fixed(HOUR_MS),
    TimeInterval::Fixed(3 * HOUR_MS),
    TimeInterval::Fixed(6 * HOUR_MS),
    TimeInterval::Fixed(12 * HOUR_MS),
    TimeInterval::Fixed(DAY_MS),
    TimeInterval::Fixed(2 * DAY_MS),
    TimeInterval::Week,
    TimeInterval::Months(1),
    TimeInterval::Months(3),
];

/// Step between "nice" ticks (1, 2 or 5 times a power of ten).
///
/// Negative results encode the inverse of a fractional step to keep the
/// tick values exact for small spans.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= SQRT_50 {
        10.0
    } else if error >= SQRT_10 {
        5.0
    } else if error >= SQRT_2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Evenly spaced round values covering `[start, stop]`, roughly `count` of them.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let increment = tick_increment(lo, hi, count);
    if increment == 0.0 || !increment.is_finite() {
        return Vec::new();
    }

    let mut ticks = Vec::new();
    if increment > 0.0 {
        let first = (lo / increment).ceil() as i64;
        let last = (hi / increment).floor() as i64;
        for index in first..=last {
            ticks.push(index as f64 * increment);
        }
    } else {
        let inverse = -increment;
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        for index in first..=last {
            ticks.push(index as f64 / inverse);
        }
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Calendar-aligned instants spanning `[start, end]`, roughly `count` of them.
///
/// The interval is the candidate whose length is closest to `span / count`.
/// Alignment is computed in UTC.
#[must_use]
pub fn time_ticks(start: DateTime<Utc>, end: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    if count == 0 {
        return Vec::new();
    }
    let (lo, hi) = if end < start { (end, start) } else { (start, end) };
    let lo_ms = lo.timestamp_millis();
    let hi_ms = hi.timestamp_millis();
    if lo_ms == hi_ms {
        return vec![lo];
    }

    let target = (hi_ms - lo_ms) as f64 / count as f64;
    let mut ticks = match select_interval(target) {
        Some(interval) => interval_ticks(interval, lo, hi),
        None if target < SECOND_MS as f64 => millis_from(linear_ticks(
            lo_ms as f64,
            hi_ms as f64,
            count,
        )),
        None => year_ticks(lo, hi, count),
    };

    if end < start {
        ticks.reverse();
    }
    ticks
}

fn select_interval(target_ms: f64) -> Option<TimeInterval> {
    let index = TIME_INTERVALS.partition_point(|interval| (interval.approx_ms() as f64) < target_ms);
    if index == 0 {
        return if target_ms < SECOND_MS as f64 {
            None
        } else {
            Some(TIME_INTERVALS[0])
        };
    }
    if index == TIME_INTERVALS.len() {
        return if target_ms > YEAR_MS as f64 {
            None
        } else {
            TIME_INTERVALS.last().copied()
        };
    }

    let below = TIME_INTERVALS[index - 1];
    let above = TIME_INTERVALS[index];
    if target_ms / (below.approx_ms() as f64) < (above.approx_ms() as f64) / target_ms {
        Some(below)
    } else {
        Some(above)
    }
}

fn interval_ticks(
    interval: TimeInterval,
    lo: DateTime<Utc>,
    hi: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    match interval {
        TimeInterval::Fixed(step) => aligned_ticks(step, 0, lo, hi),
        TimeInterval::Week => aligned_ticks(WEEK_MS, FIRST_SUNDAY_OFFSET_MS, lo, hi),
        TimeInterval::Months(count) => month_ticks(count, lo, hi),
    }
}

fn aligned_ticks(
    step_ms: i64,
    offset_ms: i64,
    lo: DateTime<Utc>,
    hi: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let lo_ms = lo.timestamp_millis() - offset_ms;
    let hi_ms = hi.timestamp_millis() - offset_ms;
    let first = lo_ms.div_euclid(step_ms) + i64::from(lo_ms.rem_euclid(step_ms) != 0);
    let last = hi_ms.div_euclid(step_ms);

    (first..=last)
        .filter_map(|index| DateTime::from_timestamp_millis(index * step_ms + offset_ms))
        .collect()
}

fn month_ticks(count: u32, lo: DateTime<Utc>, hi: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let months_from_epoch = lo.year() * 12 + lo.month0() as i32;
    let aligned = months_from_epoch - months_from_epoch.rem_euclid(count as i32);
    let Some(mut cursor) = month_start(aligned) else {
        return Vec::new();
    };

    let mut ticks = Vec::new();
    while cursor <= hi {
        if cursor >= lo {
            ticks.push(cursor);
        }
        match cursor.checked_add_months(Months::new(count)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    ticks
}

fn month_start(months: i32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(months.div_euclid(12), months.rem_euclid(12) as u32 + 1, 1)?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

fn year_ticks(lo: DateTime<Utc>, hi: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
    linear_ticks(f64::from(lo.year()), f64::from(hi.year()), count)
        .into_iter()
        .filter(|year| year.fract() == 0.0)
        .filter_map(|year| month_start(year as i32 * 12))
        .filter(|tick| *tick >= lo && *tick <= hi)
        .collect()
}

fn millis_from(values: Vec<f64>) -> Vec<DateTime<Utc>> {
    values
        .into_iter()
        .filter_map(|ms| DateTime::from_timestamp_millis(ms.round() as i64))
        .collect()
}
