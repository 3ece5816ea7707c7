//! Token-based selection state machine for the detail pane.
//!
//! The pane is the only shared mutable surface in the application, and the
//! single ordering constraint is "last selection wins": when the user selects
//! card N+1 before card N's response returns, N's response must never paint
//! the pane. Every selection allocates a monotonically increasing token; a
//! response is compared against the current token on arrival and discarded
//! when it does not match. There is no cancellation of in-flight requests —
//! suppression at arrival is sufficient for a single-consumer pane.
//!
//! [`DetailPane::accept`] is the only way to move the machine out of
//! `Loading`; no other code path may mutate the displayed detail.

use tracing::debug;

use crate::api::ApiError;
use crate::types::ProjectDetail;

/// A dispatched detail fetch: the token it must answer to plus the request
/// parameters bound at selection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub token: u64,
    /// Project identifier (the card's name).
    pub id: String,
    /// The query the result list was produced from.
    pub query: String,
}

/// What the detail pane is currently showing.
#[derive(Debug, Clone)]
pub enum DetailState {
    /// Nothing selected yet (or the list was cleared by a new search).
    Idle,
    /// A selection was made and its response has not arrived.
    Loading { token: u64, id: String },
    /// The latest selection's details are displayed.
    Ready {
        token: u64,
        id: String,
        detail: Box<ProjectDetail>,
    },
    /// The latest selection's fetch failed; `message` is panel-local.
    Failed {
        token: u64,
        id: String,
        message: String,
    },
}

/// Verdict of [`DetailPane::accept`] for one arriving response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// The response matched the current token and was applied.
    Accepted,
    /// The response was superseded by a newer selection and discarded.
    Stale,
}

/// Owner of the detail pane's state and the per-session token counter.
#[derive(Debug)]
pub struct DetailPane {
    state: DetailState,
    /// Last allocated token; 0 means no selection has happened yet.
    counter: u64,
}

impl Default for DetailPane {
    fn default() -> Self {
        Self {
            state: DetailState::Idle,
            counter: 0,
        }
    }
}

impl DetailPane {
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// True while the current selection's response is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading { .. })
    }

    /// The token the next arriving response must match, if any selection is live.
    pub fn current_token(&self) -> Option<u64> {
        match self.state {
            DetailState::Idle => None,
            DetailState::Loading { token, .. }
            | DetailState::Ready { token, .. }
            | DetailState::Failed { token, .. } => Some(token),
        }
    }

    /// Identifier of the currently selected project, if any.
    pub fn current_id(&self) -> Option<&str> {
        match &self.state {
            DetailState::Idle => None,
            DetailState::Loading { id, .. }
            | DetailState::Ready { id, .. }
            | DetailState::Failed { id, .. } => Some(id),
        }
    }

    /// Records a new selection: allocates the next token, enters `Loading`,
    /// and returns the request the caller must dispatch.
    ///
    /// The transition is synchronous — the loading placeholder is visible
    /// before the request resolves, and any response still in flight for an
    /// earlier token is doomed from this point on.
    pub fn begin(&mut self, id: &str, query: &str) -> DetailRequest {
        self.counter += 1;
        let token = self.counter;
        self.state = DetailState::Loading {
            token,
            id: id.to_owned(),
        };
        DetailRequest {
            token,
            id: id.to_owned(),
            query: query.to_owned(),
        }
    }

    /// The single gate for response arrival, success or failure alike.
    ///
    /// A response whose token does not match the current selection is
    /// discarded silently — staleness is an expected outcome of overlapping
    /// requests, not an error.
    pub fn accept(&mut self, token: u64, outcome: Result<ProjectDetail, ApiError>) -> Arrival {
        if self.current_token() != Some(token) {
            debug!(
                token,
                current = ?self.current_token(),
                "discarding stale detail response"
            );
            return Arrival::Stale;
        }
        let id = self
            .current_id()
            .map(str::to_owned)
            .unwrap_or_default();
        self.state = match outcome {
            Ok(detail) => DetailState::Ready {
                token,
                id,
                detail: Box::new(detail),
            },
            Err(err) => DetailState::Failed {
                token,
                id,
                message: err.user_message(),
            },
        };
        Arrival::Accepted
    }

    /// Clears the pane back to `Idle`.
    ///
    /// Called when a new search clears the result list. The token counter is
    /// NOT reset: responses from before the reset carry old tokens and
    /// `current_token()` is `None`, so they stay stale.
    pub fn reset(&mut self) {
        self.state = DetailState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(description: &str) -> ProjectDetail {
        serde_json::from_str(&format!(r#"{{"description":"{description}"}}"#)).unwrap()
    }

    #[test]
    fn tokens_increase_monotonically() {
        let mut pane = DetailPane::default();
        let a = pane.begin("a", "q");
        let b = pane.begin("b", "q");
        let c = pane.begin("c", "q");
        assert!(a.token < b.token && b.token < c.token);
    }

    #[test]
    fn stale_success_is_discarded() {
        let mut pane = DetailPane::default();
        let first = pane.begin("a", "q");
        let second = pane.begin("b", "q");

        // Second response lands first and is applied.
        assert_eq!(pane.accept(second.token, Ok(detail("b"))), Arrival::Accepted);
        // First response arrives late and must not repaint the pane.
        assert_eq!(pane.accept(first.token, Ok(detail("a"))), Arrival::Stale);

        match pane.state() {
            DetailState::Ready { detail, id, .. } => {
                assert_eq!(id, "b");
                assert_eq!(detail.description, "b");
            }
            other => panic!("expected Ready for b, got {other:?}"),
        }
    }

    #[test]
    fn stale_failure_is_discarded_too() {
        let mut pane = DetailPane::default();
        let first = pane.begin("a", "q");
        let second = pane.begin("b", "q");

        assert_eq!(pane.accept(second.token, Ok(detail("b"))), Arrival::Accepted);
        let late_error = ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("too late".to_owned()),
        };
        assert_eq!(pane.accept(first.token, Err(late_error)), Arrival::Stale);
        assert!(matches!(pane.state(), DetailState::Ready { .. }));
    }

    #[test]
    fn current_failure_renders_service_message() {
        let mut pane = DetailPane::default();
        let req = pane.begin("a", "q");
        let err = ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("db down".to_owned()),
        };
        assert_eq!(pane.accept(req.token, Err(err)), Arrival::Accepted);
        match pane.state() {
            DetailState::Failed { message, .. } => assert!(message.contains("db down")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn reset_makes_all_outstanding_responses_stale() {
        let mut pane = DetailPane::default();
        let req = pane.begin("a", "q");
        pane.reset();
        assert_eq!(pane.accept(req.token, Ok(detail("a"))), Arrival::Stale);
        assert!(matches!(pane.state(), DetailState::Idle));
    }
}
