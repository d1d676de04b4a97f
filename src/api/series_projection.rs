use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, TimeScale};
use crate::query::Datum;

/// Line vertex in plot-stage pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
}

/// Projects bucket rows into line vertices.
///
/// Each bucket is plotted at its time-range midpoint. Rows without a bucket
/// range or a finite measure value are skipped.
#[must_use]
pub fn project_line_points(
    rows: &[Datum],
    split_dimension: &str,
    measure_name: &str,
    x_scale: TimeScale,
    y_scale: LinearScale,
) -> Vec<LinePoint> {
    rows.iter()
        .filter_map(|row| {
            let bucket = row.time_range(split_dimension)?;
            let value = row.number(measure_name).filter(|value| value.is_finite())?;
            Some(LinePoint {
                x: x_scale.map(bucket.midpoint()),
                y: y_scale.map(value),
            })
        })
        .collect()
}
