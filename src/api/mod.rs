mod dispatcher;
mod extent;
mod layout;
mod layout_config;
mod panel;
mod series_projection;

pub use dispatcher::QueryDispatcher;
pub use extent::{filter_value_ticks, leaf_dataset, measure_extent, pad_value_extent, time_extent};
pub use layout::{
    BottomAxis, LayoutPlan, LoadingChart, MeasureChart, MeasureChartPlan, TitleLabel,
    chart_stage, column_count, compute_layout,
};
pub use layout_config::LayoutConfig;
pub use panel::{FetchOutcome, PanelProps, PendingFetch, RequestId, TimeSeriesPanel};
pub use series_projection::{LinePoint, project_line_points};
