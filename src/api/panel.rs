use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{PanelError, PanelResult};
use crate::model::{DataSource, Filter, Measure, Splits};
use crate::query::{Dataset, Query, compose_query};

use super::{LayoutConfig, LayoutPlan, QueryDispatcher, compute_layout};

/// Host-supplied inputs of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelProps {
    pub data_source: DataSource,
    pub filter: Filter,
    pub splits: Splits,
    pub measures: Vec<Measure>,
    pub container_width: f64,
}

impl PanelProps {
    /// Swaps the filter and re-buckets a lone time split to match it.
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.splits = self.splits.update_with_filter(&self.data_source, &filter);
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_measures(mut self, measures: Vec<Measure>) -> Self {
        self.measures = measures;
        self
    }

    #[must_use]
    pub fn with_container_width(mut self, container_width: f64) -> Self {
        self.container_width = container_width;
        self
    }
}

/// Monotonic id of a dispatched query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Query handed to the host for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFetch {
    pub request_id: RequestId,
    pub query: Query,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// The panel was detached before the result arrived.
    Detached,
    /// A newer request already completed, with a result or an error.
    Stale { latest: RequestId },
    /// The dispatcher failed; the previous dataset is kept.
    Failed(PanelError),
}

/// Time-series panel state: props, last result and fetch bookkeeping.
///
/// Everything runs on the caller's event loop. A fetch is split into
/// [`begin_fetch`](Self::begin_fetch) and
/// [`complete_fetch`](Self::complete_fetch) so overlapping requests can be
/// in flight; a completion older than the newest completed request, failed
/// or not, is dropped.
#[derive(Debug)]
pub struct TimeSeriesPanel {
    props: PanelProps,
    config: LayoutConfig,
    dataset: Option<Dataset>,
    attached: bool,
    next_request: u64,
    latest_completed: Option<RequestId>,
}

impl TimeSeriesPanel {
    pub fn new(props: PanelProps, config: LayoutConfig) -> PanelResult<Self> {
        Ok(Self {
            props,
            config: config.validate()?,
            dataset: None,
            attached: false,
            next_request: 0,
            latest_completed: None,
        })
    }

    #[must_use]
    pub fn props(&self) -> &PanelProps {
        &self.props
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Marks the panel live and starts the initial fetch.
    pub fn attach(&mut self) -> PendingFetch {
        self.attached = true;
        debug!(data_source = %self.props.data_source.name, "panel attached");
        self.begin_fetch()
    }

    /// Marks the panel dead; later completions are discarded.
    pub fn detach(&mut self) {
        self.attached = false;
        debug!(data_source = %self.props.data_source.name, "panel detached");
    }

    /// Stores new props, refetching when the filter, splits or measures
    /// changed.
    ///
    /// A width change only affects layout of the current result.
    pub fn update_props(&mut self, next: PanelProps) -> Option<PendingFetch> {
        let refetch = self.props.filter != next.filter
            || self.props.splits != next.splits
            || self.props.measures != next.measures;
        self.props = next;
        if refetch && self.attached {
            Some(self.begin_fetch())
        } else {
            None
        }
    }

    /// Composes the query for the current props under a fresh request id.
    pub fn begin_fetch(&mut self) -> PendingFetch {
        self.next_request += 1;
        let request_id = RequestId(self.next_request);
        let query = compose_query(&self.props.filter, &self.props.splits, &self.props.measures);
        trace!(request_id = request_id.get(), "fetch dispatched");
        PendingFetch { request_id, query }
    }

    /// Applies a dispatch result if the panel is attached and no newer
    /// request has completed yet, successfully or not.
    pub fn complete_fetch(
        &mut self,
        request_id: RequestId,
        result: PanelResult<Dataset>,
    ) -> FetchOutcome {
        if !self.attached {
            trace!(request_id = request_id.get(), "dropping result for detached panel");
            return FetchOutcome::Detached;
        }
        if let Some(latest) = self.latest_completed.filter(|latest| *latest > request_id) {
            debug!(
                request_id = request_id.get(),
                latest = latest.get(),
                "dropping stale result"
            );
            return FetchOutcome::Stale { latest };
        }

        self.latest_completed = Some(request_id);
        match result {
            Ok(dataset) => {
                trace!(request_id = request_id.get(), rows = dataset.len(), "fetch applied");
                self.dataset = Some(dataset);
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(request_id = request_id.get(), error = %err, "query dispatch failed");
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Dispatches the current query and applies its result.
    pub async fn refresh<D: QueryDispatcher>(&mut self, dispatcher: &D) -> FetchOutcome {
        let PendingFetch { request_id, query } = self.begin_fetch();
        let result = dispatcher.dispatch(&query).await;
        self.complete_fetch(request_id, result)
    }

    /// Layout of the last applied result, or `None` while not renderable.
    #[must_use]
    pub fn layout(&self) -> Option<LayoutPlan> {
        compute_layout(
            self.dataset.as_ref()?,
            &self.props.splits,
            &self.props.measures,
            self.props.container_width,
            &self.config,
        )
    }
}
