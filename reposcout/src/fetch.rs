//! Fetch tasks bridging the API client and the event loop.
//!
//! Each user action that needs the network spawns one tokio task holding a
//! clone of the `ApiClient`; the task performs the call and reports back over
//! the unified event channel. Nothing blocks the interface thread, and
//! several detail fetches may be outstanding at once when the user clicks
//! through cards quickly — ordering is resolved at arrival time by the
//! token gate in `reposcout_core::selection`, never here. In-flight requests
//! are not cancelled; a superseded response is simply discarded on arrival.

use reposcout_core::selection::DetailRequest;
use reposcout_core::types::{ProcessOutcome, ProjectDetail, SearchResult};
use reposcout_core::{ApiClient, ApiError};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::event::AppEvent;

/// Outcome of one search request.
#[derive(Debug)]
pub struct SearchPayload {
    /// The query the request was issued for, used to label the result list.
    pub query: String,
    pub result: Result<Vec<SearchResult>, ApiError>,
}

/// Outcome of one detail fetch, tagged with its selection token.
#[derive(Debug)]
pub struct DetailPayload {
    pub token: u64,
    pub result: Result<ProjectDetail, ApiError>,
}

/// Outcome of the process-selected request.
#[derive(Debug)]
pub struct ProcessPayload {
    pub result: Result<ProcessOutcome, ApiError>,
}

/// Cloneable handle the app state uses to dispatch requests.
///
/// Holds the API client and the event sender; both are cheap to clone
/// (`reqwest::Client` shares its pool, the sender is an mpsc handle).
#[derive(Debug, Clone)]
pub struct FetchHandle {
    client: ApiClient,
    tx: UnboundedSender<AppEvent>,
}

impl FetchHandle {
    pub fn new(client: ApiClient, tx: UnboundedSender<AppEvent>) -> Self {
        Self { client, tx }
    }

    /// Dispatches a search for `query`.
    ///
    /// The caller has already rejected empty/whitespace queries at the input
    /// boundary — this function assumes a real query.
    pub fn spawn_search(&self, query: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            info!(%query, "dispatching search");
            let result = client.search(&query).await;
            if let Err(err) = &result {
                warn!(%query, error = %err, "search failed");
            }
            let _ = tx.send(AppEvent::SearchDone(Box::new(SearchPayload { query, result })));
        });
    }

    /// Dispatches a detail fetch for a selection made by the pane machine.
    ///
    /// The payload travels back tagged with `request.token`; the event loop
    /// routes it through `DetailPane::accept`, which decides staleness.
    pub fn spawn_detail(&self, request: DetailRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            info!(token = request.token, id = %request.id, "dispatching detail fetch");
            let result = client.project_details(&request.id, &request.query).await;
            if let Err(err) = &result {
                warn!(token = request.token, id = %request.id, error = %err, "detail fetch failed");
            }
            let _ = tx.send(AppEvent::DetailDone(Box::new(DetailPayload {
                token: request.token,
                result,
            })));
        });
    }

    /// Submits the selected project URLs for processing.
    pub fn spawn_process(&self, urls: Vec<String>) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            info!(count = urls.len(), "dispatching process-selected");
            let result = client.process_selected(&urls).await;
            if let Err(err) = &result {
                warn!(error = %err, "process-selected failed");
            }
            let _ = tx.send(AppEvent::ProcessDone(Box::new(ProcessPayload { result })));
        });
    }
}
