//! Integration test for the detail-pane selection machine.
//!
//! Exercises: begin/accept/reset, the staleness gate, and the ordering
//! guarantee that any permutation of response completion order leaves the
//! pane showing the last selection's outcome.

use reposcout_core::selection::{Arrival, DetailPane, DetailState};
use reposcout_core::types::ProjectDetail;

fn detail_named(name: &str) -> ProjectDetail {
    serde_json::from_str(&format!(r#"{{"description":"{name}"}}"#)).unwrap()
}

#[test]
fn selection_lifecycle() {
    let mut pane = DetailPane::default();
    assert!(matches!(pane.state(), DetailState::Idle));
    assert_eq!(pane.current_token(), None);

    // Selecting a card synchronously enters Loading before any response.
    let req = pane.begin("proj-a", "tui");
    assert!(pane.is_loading());
    assert_eq!(pane.current_id(), Some("proj-a"));
    assert_eq!(req.id, "proj-a");
    assert_eq!(req.query, "tui");

    // The matching response is applied.
    assert_eq!(pane.accept(req.token, Ok(detail_named("proj-a"))), Arrival::Accepted);
    match pane.state() {
        DetailState::Ready { detail, .. } => assert_eq!(detail.description, "proj-a"),
        other => panic!("expected Ready, got {other:?}"),
    }

    // A new search resets the pane; the old token can never match again.
    pane.reset();
    assert!(matches!(pane.state(), DetailState::Idle));
    assert_eq!(pane.accept(req.token, Ok(detail_named("proj-a"))), Arrival::Stale);
}

/// Spec ordering guarantee: for N rapid selections, every permutation of
/// response completion order must leave the pane showing the Nth selection.
#[test]
fn last_selection_wins_under_any_completion_order() {
    let ids = ["a", "b", "c"];
    let permutations: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for order in permutations {
        let mut pane = DetailPane::default();
        let requests: Vec<_> = ids.iter().map(|id| pane.begin(id, "q")).collect();

        for &i in &order {
            let verdict = pane.accept(requests[i].token, Ok(detail_named(ids[i])));
            if requests[i].token == requests[2].token {
                assert_eq!(verdict, Arrival::Accepted, "order {order:?}");
            } else {
                assert_eq!(verdict, Arrival::Stale, "order {order:?}");
            }
        }

        match pane.state() {
            DetailState::Ready { detail, id, .. } => {
                assert_eq!(id, "c", "completion order {order:?}");
                assert_eq!(detail.description, "c", "completion order {order:?}");
            }
            other => panic!("order {order:?}: expected Ready for c, got {other:?}"),
        }
    }
}

/// A late error for a superseded selection is suppressed exactly like a late
/// success; only the current selection's failure is surfaced.
#[test]
fn failures_respect_the_same_gate() {
    let mut pane = DetailPane::default();
    let first = pane.begin("a", "q");
    let second = pane.begin("b", "q");

    let err = || reposcout_core::ApiError::Status {
        status: reposcout_core::api::StatusCode::SERVICE_UNAVAILABLE,
        message: Some("backend rebooting".to_owned()),
    };

    assert_eq!(pane.accept(first.token, Err(err())), Arrival::Stale);
    assert!(pane.is_loading(), "stale failure must not leave Loading");

    assert_eq!(pane.accept(second.token, Err(err())), Arrival::Accepted);
    match pane.state() {
        DetailState::Failed { message, id, .. } => {
            assert_eq!(id, "b");
            assert!(message.contains("backend rebooting"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}
