use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ticks::linear_ticks;
use crate::core::time_scale::TimeScale;
use crate::error::{PanelError, PanelResult};

/// Linear mapping from a numeric domain onto a pixel range.
///
/// A zero-width domain maps every value to the start of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> PanelResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(PanelError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(PanelError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.0
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        let normalized = if span == 0.0 {
            0.0
        } else {
            (pixel - self.range_start) / span
        };
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round tick values across the domain; see [`linear_ticks`].
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain_start, self.domain_end, count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Time,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScaleDomain {
    Time(DateTime<Utc>, DateTime<Utc>),
    Linear(f64, f64),
}

/// Built scale, either flavour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Time(TimeScale),
    Linear(LinearScale),
}

impl Scale {
    #[must_use]
    pub fn kind(self) -> ScaleKind {
        match self {
            Self::Time(_) => ScaleKind::Time,
            Self::Linear(_) => ScaleKind::Linear,
        }
    }

    #[must_use]
    pub fn as_time(self) -> Option<TimeScale> {
        match self {
            Self::Time(scale) => Some(scale),
            Self::Linear(_) => None,
        }
    }

    #[must_use]
    pub fn as_linear(self) -> Option<LinearScale> {
        match self {
            Self::Linear(scale) => Some(scale),
            Self::Time(_) => None,
        }
    }

    /// Pixel positions of the default ticks.
    #[must_use]
    pub fn tick_positions(self, count: usize) -> Vec<f64> {
        match self {
            Self::Time(scale) => scale
                .ticks(count)
                .into_iter()
                .map(|tick| scale.map(tick))
                .collect(),
            Self::Linear(scale) => scale
                .ticks(count)
                .into_iter()
                .map(|tick| scale.map(tick))
                .collect(),
        }
    }
}

/// Maps an extent onto a pixel range.
///
/// Scales are cheap values and are rebuilt on every layout pass.
pub fn build_scale(kind: ScaleKind, domain: ScaleDomain, range: (f64, f64)) -> PanelResult<Scale> {
    match (kind, domain) {
        (ScaleKind::Time, ScaleDomain::Time(start, end)) => {
            TimeScale::new((start, end), range).map(Scale::Time)
        }
        (ScaleKind::Linear, ScaleDomain::Linear(min, max)) => {
            LinearScale::new((min, max), range).map(Scale::Linear)
        }
        (kind, domain) => Err(PanelError::InvalidData(format!(
            "{kind:?} scale cannot use a {domain:?} domain"
        ))),
    }
}
