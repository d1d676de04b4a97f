use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scale::LinearScale;
use crate::core::ticks::time_ticks;
use crate::error::{PanelError, PanelResult};

/// Maps an instant domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain_start: DateTime<Utc>,
    domain_end: DateTime<Utc>,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> PanelResult<Self> {
        let linear = LinearScale::new(
            (
                domain.0.timestamp_millis() as f64,
                domain.1.timestamp_millis() as f64,
            ),
            range,
        )?;
        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            linear,
        })
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn map(self, time: DateTime<Utc>) -> f64 {
        self.linear.map(time.timestamp_millis() as f64)
    }

    pub fn invert(self, pixel: f64) -> PanelResult<DateTime<Utc>> {
        let millis = self.linear.invert(pixel);
        if !millis.is_finite() {
            return Err(PanelError::InvalidData("pixel must be finite".to_owned()));
        }
        DateTime::from_timestamp_millis(millis.round() as i64).ok_or_else(|| {
            PanelError::InvalidData(format!("pixel {pixel} maps outside the instant range"))
        })
    }

    /// Calendar-aligned ticks appropriate to the domain span.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<DateTime<Utc>> {
        time_ticks(self.domain_start, self.domain_end, count)
    }
}
