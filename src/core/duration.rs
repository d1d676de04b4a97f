use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, PanelResult};

pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;
pub const WEEK_MS: i64 = 7 * DAY_MS;

/// Calendar unit of a bucket duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl DurationUnit {
    /// Fixed length of one unit in milliseconds, ignoring DST shifts.
    #[must_use]
    pub const fn canonical_length_ms(self) -> i64 {
        match self {
            Self::Second => SECOND_MS,
            Self::Minute => MINUTE_MS,
            Self::Hour => HOUR_MS,
            Self::Day => DAY_MS,
            Self::Week => WEEK_MS,
        }
    }

    const fn designator(self) -> char {
        match self {
            Self::Second => 'S',
            Self::Minute => 'M',
            Self::Hour => 'H',
            Self::Day => 'D',
            Self::Week => 'W',
        }
    }

    const fn is_time_part(self) -> bool {
        matches!(self, Self::Second | Self::Minute | Self::Hour)
    }
}

/// Single-unit ISO-8601 duration (`PT1M`, `PT1H`, `P1D`, `P2W`, ...).
///
/// Equality is structural: `PT60M` and `PT1H` are different bucket sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duration {
    count: u32,
    unit: DurationUnit,
}

impl Duration {
    pub fn new(count: u32, unit: DurationUnit) -> PanelResult<Self> {
        if count == 0 {
            return Err(PanelError::InvalidDuration(format!(
                "0{}",
                unit.designator()
            )));
        }
        Ok(Self { count, unit })
    }

    #[must_use]
    pub const fn minute() -> Self {
        Self {
            count: 1,
            unit: DurationUnit::Minute,
        }
    }

    #[must_use]
    pub const fn hour() -> Self {
        Self {
            count: 1,
            unit: DurationUnit::Hour,
        }
    }

    #[must_use]
    pub const fn day() -> Self {
        Self {
            count: 1,
            unit: DurationUnit::Day,
        }
    }

    #[must_use]
    pub const fn count(self) -> u32 {
        self.count
    }

    #[must_use]
    pub const fn unit(self) -> DurationUnit {
        self.unit
    }

    #[must_use]
    pub const fn canonical_length_ms(self) -> i64 {
        self.count as i64 * self.unit.canonical_length_ms()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_time_part() {
            write!(f, "PT{}{}", self.count, self.unit.designator())
        } else {
            write!(f, "P{}{}", self.count, self.unit.designator())
        }
    }
}

impl FromStr for Duration {
    type Err = PanelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || PanelError::InvalidDuration(input.to_owned());

        let body = input.strip_prefix('P').ok_or_else(invalid)?;
        let (body, time_part) = match body.strip_prefix('T') {
            Some(rest) => (rest, true),
            None => (body, false),
        };

        let designator = body.chars().last().ok_or_else(invalid)?;
        let digits = &body[..body.len() - designator.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let count: u32 = digits.parse().map_err(|_| invalid())?;

        let unit = match (time_part, designator) {
            (true, 'S') => DurationUnit::Second,
            (true, 'M') => DurationUnit::Minute,
            (true, 'H') => DurationUnit::Hour,
            (false, 'D') => DurationUnit::Day,
            (false, 'W') => DurationUnit::Week,
            _ => return Err(invalid()),
        };

        Self::new(count, unit).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Duration {
    type Error = PanelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Duration> for String {
    fn from(value: Duration) -> Self {
        value.to_string()
    }
}

/// IANA timezone name carried by time-bucket actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timezone(String);

impl Timezone {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn utc() -> Self {
        Self::new("Etc/UTC")
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
