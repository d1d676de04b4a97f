//! timeseries-panel: query composition and layout for time-series dashboard panels.
//!
//! The crate turns a filter, an ordered split list and a measure selection
//! into a nested aggregation query, then turns the query result into stages,
//! scales and line geometry for a multi-column, one-chart-per-measure panel.
//! Query execution and drawing stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod model;
pub mod query;
pub mod telemetry;

pub use api::{LayoutConfig, LayoutPlan, QueryDispatcher, TimeSeriesPanel, compute_layout};
pub use error::{PanelError, PanelResult};
pub use model::{Filter, SplitCombine, Splits};
pub use query::{Dataset, Query, compose_query};
