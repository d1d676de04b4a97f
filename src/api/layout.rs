use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{LinearScale, Margin, ScaleDomain, ScaleKind, Stage, TimeScale, build_scale};
use crate::model::{Measure, Splits};
use crate::query::Dataset;

use super::extent::{filter_value_ticks, leaf_dataset, measure_extent, pad_value_extent, time_extent};
use super::series_projection::{LinePoint, project_line_points};
use super::LayoutConfig;

/// Title text anchor inside a chart stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Chart of a measure that has no finite samples yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingChart {
    pub measure_name: String,
    pub title: TitleLabel,
}

/// Fully scaled chart of one measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureChartPlan {
    pub measure_name: String,
    pub title: TitleLabel,
    /// Aggregate over the whole filter, shown next to the title.
    pub total: Option<f64>,
    /// Padded value domain; always contains zero.
    pub extent: (f64, f64),
    pub y_scale: LinearScale,
    /// Value-axis and horizontal grid ticks.
    pub y_ticks: Vec<f64>,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasureChart {
    Loading(LoadingChart),
    Ready(MeasureChartPlan),
}

impl MeasureChart {
    #[must_use]
    pub fn measure_name(&self) -> &str {
        match self {
            Self::Loading(chart) => &chart.measure_name,
            Self::Ready(chart) => &chart.measure_name,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    #[must_use]
    pub fn as_ready(&self) -> Option<&MeasureChartPlan> {
        match self {
            Self::Ready(chart) => Some(chart),
            Self::Loading(_) => None,
        }
    }
}

/// Time axis drawn under one column of charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BottomAxis {
    pub column: usize,
    pub stage: Stage,
}

/// Everything the drawing leaves need for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub column_count: usize,
    /// Per-chart box: title band plus graph body.
    pub chart_stage: Stage,
    /// Plot area inside `chart_stage`.
    pub line_stage: Stage,
    pub y_axis_stage: Stage,
    pub x_axis_stage: Stage,
    pub time_extent: (DateTime<Utc>, DateTime<Utc>),
    pub x_scale: TimeScale,
    /// Time-axis and vertical grid ticks, shared by every chart.
    pub x_ticks: Vec<DateTime<Utc>>,
    pub measure_charts: Vec<MeasureChart>,
    pub bottom_axes: Vec<BottomAxis>,
}

/// Number of side-by-side chart columns for a container.
#[must_use]
pub fn column_count(container_width: f64, config: &LayoutConfig) -> usize {
    let columns = (container_width / config.max_graph_width).ceil();
    if columns.is_finite() && columns >= 1.0 {
        columns as usize
    } else {
        1
    }
}

/// Per-chart stage for a container split into `columns` columns.
#[must_use]
pub fn chart_stage(container_width: f64, columns: usize, config: &LayoutConfig) -> Stage {
    let inner_width = container_width - config.horizontal_padding * 2.0;
    let width = (inner_width / columns.max(1) as f64).floor().max(0.0);
    Stage::new(
        config.horizontal_padding,
        0.0,
        width,
        config.title_band_height + config.graph_height,
    )
}

/// Derives extents, stages and scales for the current result.
///
/// Returns `None` when nothing can be drawn: no splits, or no leaf buckets
/// in the result yet.
#[must_use]
pub fn compute_layout(
    dataset: &Dataset,
    splits: &Splits,
    measures: &[Measure],
    container_width: f64,
    config: &LayoutConfig,
) -> Option<LayoutPlan> {
    let split_dimension = splits.last()?.dimension.as_str();
    let leaf = leaf_dataset(dataset, splits).filter(|rows| !rows.is_empty())?;
    let Some(time_extent) = time_extent(leaf, split_dimension) else {
        trace!(split_dimension, "leaf rows carry no time buckets");
        return None;
    };

    let column_count = column_count(container_width, config);
    let chart_stage = chart_stage(container_width, column_count, config);
    let line_stage = chart_stage.within(
        Margin::default()
            .top(config.title_band_height)
            .right(config.y_axis_width),
    );
    let y_axis_stage = chart_stage.within(
        Margin::default()
            .top(config.title_band_height)
            .left(line_stage.width),
    );

    let x_scale = match build_scale(
        ScaleKind::Time,
        ScaleDomain::Time(time_extent.0, time_extent.1),
        (0.0, line_stage.width),
    ) {
        Ok(scale) => scale.as_time()?,
        Err(err) => {
            warn!(error = %err, "skipping layout with unusable time extent");
            return None;
        }
    };
    let x_ticks = x_scale.ticks(config.time_tick_count);

    let total_row = dataset.first();
    let measure_charts = measures
        .iter()
        .map(|measure| {
            let total = total_row.and_then(|row| row.number(&measure.name));
            measure_chart(measure, total, leaf, split_dimension, x_scale, line_stage, config)
        })
        .collect();

    let x_axis_stage = Stage::from_size(chart_stage.width, config.x_axis_height);
    let bottom_axes = (0..column_count)
        .map(|column| BottomAxis {
            column,
            stage: x_axis_stage,
        })
        .collect();

    trace!(
        column_count,
        chart_width = chart_stage.width,
        leaf_rows = leaf.len(),
        measures = measures.len(),
        "computed panel layout"
    );

    Some(LayoutPlan {
        column_count,
        chart_stage,
        line_stage,
        y_axis_stage,
        x_axis_stage,
        time_extent,
        x_scale,
        x_ticks,
        measure_charts,
        bottom_axes,
    })
}

fn measure_chart(
    measure: &Measure,
    total: Option<f64>,
    leaf: &Dataset,
    split_dimension: &str,
    x_scale: TimeScale,
    line_stage: Stage,
    config: &LayoutConfig,
) -> MeasureChart {
    let loading = || {
        MeasureChart::Loading(LoadingChart {
            measure_name: measure.name.clone(),
            title: TitleLabel {
                x: config.title_text_left,
                y: config.title_text_top,
                text: format!("{}: Loading", measure.title),
            },
        })
    };

    let Some(raw_extent) = measure_extent(leaf.rows(), &measure.name) else {
        return loading();
    };
    let extent = pad_value_extent(raw_extent);

    let y_scale = match build_scale(
        ScaleKind::Linear,
        ScaleDomain::Linear(extent.0, extent.1),
        (line_stage.height, 0.0),
    )
    .map(|scale| scale.as_linear())
    {
        Ok(Some(scale)) => scale,
        Ok(None) => return loading(),
        Err(err) => {
            warn!(measure = %measure.name, error = %err, "measure extent is not scalable");
            return loading();
        }
    };

    MeasureChart::Ready(MeasureChartPlan {
        measure_name: measure.name.clone(),
        title: TitleLabel {
            x: config.title_text_left,
            y: config.title_text_top,
            text: measure.title.clone(),
        },
        total,
        extent,
        y_scale,
        y_ticks: filter_value_ticks(y_scale.ticks(config.value_tick_count)),
        points: project_line_points(leaf.rows(), split_dimension, &measure.name, x_scale, y_scale),
    })
}
