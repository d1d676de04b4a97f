use std::future::Future;

use crate::error::PanelResult;
use crate::query::{Dataset, Query};

/// Remote execution capability injected by the host.
///
/// The panel never cancels, retries or times out a dispatch; a future that
/// never resolves leaves the panel in its last state.
pub trait QueryDispatcher {
    fn dispatch(&self, query: &Query) -> impl Future<Output = PanelResult<Dataset>>;
}

impl<F, Fut> QueryDispatcher for F
where
    F: Fn(&Query) -> Fut,
    Fut: Future<Output = PanelResult<Dataset>>,
{
    fn dispatch(&self, query: &Query) -> impl Future<Output = PanelResult<Dataset>> {
        self(query)
    }
}
