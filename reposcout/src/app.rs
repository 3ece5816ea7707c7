//! Central application state for reposcout.
//!
//! This module owns all mutable UI state: the current mode, which panel has
//! focus, the query input buffer, the result list, the detail pane machine,
//! per-panel scroll offsets and viewport heights, and panel width
//! percentages. No ratatui rendering logic lives here — `app.rs` is pure
//! state that is read by the render module and mutated by the keybinding
//! dispatcher and the fetch-result handlers.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::ListState;
use reposcout_core::selection::{Arrival, DetailPane, DetailState};
use reposcout_core::types::SearchResult;
use tracing::debug;

use crate::fetch::{DetailPayload, FetchHandle, ProcessPayload, SearchPayload};
use crate::theme::Theme;

/// Braille spinner frames shown while a request is outstanding.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// UI mode controlling which keybinding set is active.
///
/// The default mode is `Normal`. Transitions are driven by the keybinding
/// dispatcher.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal vim-style navigation mode (default).
    #[default]
    Normal,
    /// Query editing mode — keystrokes go to the search input.
    Search,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
    /// Overlay listing the selected projects for processing.
    SelectedOverlay,
}

/// Which panel currently has keyboard focus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left panel showing the search result cards.
    #[default]
    Results,
    /// Right panel showing details for the selected project.
    Detail,
}

impl PanelFocus {
    /// With two panels, previous and next are both the other panel.
    pub fn toggle(self) -> Self {
        match self {
            PanelFocus::Results => PanelFocus::Detail,
            PanelFocus::Detail => PanelFocus::Results,
        }
    }
}

/// What the result panel shows when there are no cards to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsPlaceholder {
    /// No search issued yet this session.
    Pristine,
    /// A search is in flight.
    Searching,
    /// The last search succeeded with zero results (not an error).
    Empty,
    /// The last search failed; the message is panel-local.
    Error(String),
}

/// Progress of the process-selected request, shown inside the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStatus {
    Pending,
    Done(String),
    Failed(String),
}

/// Hover popup anchored at the mouse position.
///
/// `index` is the hovered card; content (star-history chart link) is derived
/// from the card's URL at render time. Pure visibility state — showing and
/// hiding it performs no network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarPopup {
    pub index: usize,
    pub x: u16,
    pub y: u16,
}

/// All mutable UI state passed through every render cycle.
///
/// Bundled into one struct so the render function receives a single reference
/// and the keybinding dispatcher a single mutable reference.
pub struct AppState {
    /// Current mode governing which keybindings are active.
    pub mode: Mode,
    /// Which panel currently receives keyboard scroll/navigation events.
    pub focus: PanelFocus,

    /// Edit buffer for the search bar (live while in `Search` mode).
    pub query_input: String,
    /// The query the current result list was produced from.
    pub active_query: String,
    /// True between dispatching a search and its payload arriving.
    pub searching: bool,
    /// True once any search has been issued this session.
    pub has_searched: bool,
    /// Panel-local error from the last search, if it failed.
    pub search_error: Option<String>,

    /// Cards from the most recent successful search, in response order.
    pub results: Vec<SearchResult>,
    /// Stateful list widget backing the results panel.
    pub results_state: ListState,
    /// Per-card checkbox flags, parallel to `results`.
    pub selected: Vec<bool>,

    /// The race-guarded detail pane machine (owns the selection token).
    pub detail: DetailPane,
    /// Pre-built lines for the detail panel, rebuilt once per accepted payload.
    pub detail_lines: Vec<Line<'static>>,
    /// Vertical scroll offset for the detail panel.
    pub detail_scroll: usize,

    /// Inner height of the results panel after borders, cached after each render.
    pub results_viewport_height: u16,
    /// Inner height of the detail panel after borders, cached after each render.
    pub detail_viewport_height: u16,

    /// Width percentage allocated to the results panel. Default: 40.
    pub left_pct: u16,
    /// Width percentage allocated to the detail panel. Default: 60.
    pub right_pct: u16,
    /// Panel rects cached at render time for mouse hit testing.
    pub panel_rects: [Rect; 2],

    /// Vertical scroll offset of the help overlay.
    pub help_scroll: u16,

    /// Hover popup for a card's stat region, if one is showing.
    pub star_popup: Option<StarPopup>,
    /// Progress of the process-selected request, if one was dispatched.
    pub process_status: Option<ProcessStatus>,

    /// Current spinner frame index, advanced on logic ticks while busy.
    pub spinner_frame: usize,

    /// Handle for dispatching fetch tasks. `None` only in headless tests.
    pub fetch: Option<FetchHandle>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            query_input: String::new(),
            active_query: String::new(),
            searching: false,
            has_searched: false,
            search_error: None,
            results: Vec::new(),
            results_state: ListState::default(),
            selected: Vec::new(),
            detail: DetailPane::default(),
            detail_lines: Vec::new(),
            detail_scroll: 0,
            results_viewport_height: 0,
            detail_viewport_height: 0,
            left_pct: 40,
            right_pct: 60,
            panel_rects: [Rect::default(); 2],
            help_scroll: 0,
            star_popup: None,
            process_status: None,
            spinner_frame: 0,
            fetch: None,
        }
    }
}

impl AppState {
    // -----------------------------------------------------------------
    // Search (result list controller)
    // -----------------------------------------------------------------

    /// Submits the current input buffer as a search.
    ///
    /// An empty or whitespace-only buffer is a no-op: no request is issued
    /// and no UI state changes. Otherwise the previous result list and the
    /// detail pane are cleared synchronously before the request is
    /// dispatched, so there is never a window where old cards are visible
    /// under the new query.
    pub fn submit_search(&mut self) {
        let query = self.query_input.trim();
        if query.is_empty() {
            return;
        }
        self.active_query = query.to_owned();
        self.searching = true;
        self.has_searched = true;
        self.search_error = None;
        self.results.clear();
        self.selected.clear();
        self.results_state = ListState::default();
        self.detail.reset();
        self.detail_lines.clear();
        self.detail_scroll = 0;
        self.star_popup = None;
        self.process_status = None;
        self.mode = Mode::Normal;
        if let Some(fetch) = &self.fetch {
            fetch.spawn_search(self.active_query.clone());
        }
    }

    /// Applies a resolved search payload.
    ///
    /// Always clears the `searching` flag — success or failure, the panel
    /// never sticks in the searching state.
    pub fn apply_search_payload(&mut self, payload: SearchPayload) {
        self.searching = false;
        match payload.result {
            Ok(results) => {
                debug!(query = %payload.query, count = results.len(), "search results applied");
                self.selected = vec![false; results.len()];
                self.results = results;
                self.search_error = None;
                if !self.results.is_empty() {
                    self.results_state.select(Some(0));
                }
            }
            Err(err) => {
                self.results.clear();
                self.selected.clear();
                self.search_error =
                    Some(format!("Error searching projects: {}", err.user_message()));
            }
        }
    }

    /// What the results panel should show when it has no cards.
    pub fn results_placeholder(&self) -> ResultsPlaceholder {
        if self.searching {
            ResultsPlaceholder::Searching
        } else if let Some(message) = &self.search_error {
            ResultsPlaceholder::Error(message.clone())
        } else if self.has_searched {
            ResultsPlaceholder::Empty
        } else {
            ResultsPlaceholder::Pristine
        }
    }

    // -----------------------------------------------------------------
    // Selection (detail pane controller)
    // -----------------------------------------------------------------

    /// Selects the card under the list cursor and dispatches its detail fetch.
    ///
    /// The pane machine enters `Loading` synchronously, so the placeholder is
    /// visible before the request resolves. Selection also toggles the card's
    /// checkbox, feeding the process-selected flow.
    pub fn select_current(&mut self) {
        let Some(index) = self.results_state.selected() else {
            return;
        };
        self.select_index(index);
    }

    /// Selects the card at `index` (used by mouse clicks on a row).
    pub fn select_index(&mut self, index: usize) {
        let Some(result) = self.results.get(index) else {
            return;
        };
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = !*flag;
        }
        self.results_state.select(Some(index));
        let request = self.detail.begin(&result.name, &self.active_query);
        self.detail_lines.clear();
        self.detail_scroll = 0;
        if let Some(fetch) = &self.fetch {
            fetch.spawn_detail(request);
        }
    }

    /// Routes a resolved detail payload through the staleness gate.
    ///
    /// Stale payloads are dropped without touching any pane state; accepted
    /// ones rebuild the cached detail lines.
    pub fn apply_detail_payload(&mut self, payload: DetailPayload, theme: &Theme) {
        match self.detail.accept(payload.token, payload.result) {
            Arrival::Stale => {
                debug!(token = payload.token, "stale detail payload dropped");
            }
            Arrival::Accepted => {
                self.detail_scroll = 0;
                self.detail_lines = match self.detail.state() {
                    DetailState::Ready { detail, .. } => {
                        crate::ui::detail::build_detail_lines(detail, theme)
                    }
                    // Loading/Failed/Idle render from the state directly.
                    _ => Vec::new(),
                };
            }
        }
    }

    // -----------------------------------------------------------------
    // Process-selected overlay
    // -----------------------------------------------------------------

    /// URLs of all checked cards, in list order.
    pub fn selected_urls(&self) -> Vec<String> {
        self.results
            .iter()
            .zip(&self.selected)
            .filter(|(_, &checked)| checked)
            .map(|(r, _)| r.url.clone())
            .collect()
    }

    /// Dispatches the process-selected request for the checked cards.
    ///
    /// A no-op when nothing is checked or a request is already pending.
    pub fn submit_process_selected(&mut self) {
        if self.process_status == Some(ProcessStatus::Pending) {
            return;
        }
        let urls = self.selected_urls();
        if urls.is_empty() {
            return;
        }
        self.process_status = Some(ProcessStatus::Pending);
        if let Some(fetch) = &self.fetch {
            fetch.spawn_process(urls);
        }
    }

    pub fn apply_process_payload(&mut self, payload: ProcessPayload) {
        self.process_status = Some(match payload.result {
            Ok(outcome) => ProcessStatus::Done(outcome.message),
            Err(err) => ProcessStatus::Failed(err.user_message()),
        });
    }

    /// Toggles the checkbox of the card under the cursor without selecting it.
    pub fn toggle_checked_current(&mut self) {
        if let Some(index) = self.results_state.selected() {
            if let Some(flag) = self.selected.get_mut(index) {
                *flag = !*flag;
            }
        }
    }

    // -----------------------------------------------------------------
    // Spinner
    // -----------------------------------------------------------------

    /// True while any request whose progress the UI shows is outstanding.
    pub fn is_busy(&self) -> bool {
        self.searching
            || self.detail.is_loading()
            || self.process_status == Some(ProcessStatus::Pending)
    }

    /// Advances the spinner on each logic tick while busy.
    pub fn on_tick(&mut self) {
        if self.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn spinner_glyph(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    // -----------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------

    /// Scrolls the focused panel down by `lines` rows.
    ///
    /// For `Results`: advances the `ListState` selection by `lines` items.
    /// For `Detail`: adds `lines` to the usize scroll offset (saturating).
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Results => {
                self.results_state.scroll_down_by(lines);
            }
            PanelFocus::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_add(lines as usize);
            }
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::Results => {
                self.results_state.scroll_up_by(lines);
            }
            PanelFocus::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(lines as usize);
            }
        }
    }

    /// Scrolls the focused panel to the very top.
    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::Results => {
                self.results_state.select_first();
            }
            PanelFocus::Detail => {
                self.detail_scroll = 0;
            }
        }
    }

    /// Scrolls the focused panel to the very bottom.
    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::Results => {
                self.results_state.select_last();
            }
            PanelFocus::Detail => {
                self.detail_scroll = self.detail_lines.len().saturating_sub(1);
            }
        }
    }

    /// Scrolls the focused panel down by half its visible height.
    ///
    /// Uses the viewport height cached from the previous render. If the
    /// cached height is zero (first frame), scrolls by 1 to avoid a no-op.
    pub fn half_page_down(&mut self) {
        let half = match self.focus {
            PanelFocus::Results => self.results_viewport_height / 2,
            PanelFocus::Detail => self.detail_viewport_height / 2,
        };
        self.scroll_down(half.max(1));
    }

    /// Scrolls the focused panel up by half its visible height.
    pub fn half_page_up(&mut self) {
        let half = match self.focus {
            PanelFocus::Results => self.results_viewport_height / 2,
            PanelFocus::Detail => self.detail_viewport_height / 2,
        };
        self.scroll_up(half.max(1));
    }

    /// Scrolls the focused panel down by its full visible height (one page).
    pub fn full_page_down(&mut self) {
        let full = match self.focus {
            PanelFocus::Results => self.results_viewport_height,
            PanelFocus::Detail => self.detail_viewport_height,
        };
        self.scroll_down(full.max(1));
    }

    /// Scrolls the focused panel up by its full visible height (one page).
    pub fn full_page_up(&mut self) {
        let full = match self.focus {
            PanelFocus::Results => self.results_viewport_height,
            PanelFocus::Detail => self.detail_viewport_height,
        };
        self.scroll_up(full.max(1));
    }

    /// Moves the result-list cursor up one card, regardless of focus.
    pub fn prev_result(&mut self) {
        self.results_state.scroll_up_by(1);
    }

    /// Moves the result-list cursor down one card, regardless of focus.
    pub fn next_result(&mut self) {
        self.results_state.scroll_down_by(1);
    }

    // -----------------------------------------------------------------
    // Panel geometry
    // -----------------------------------------------------------------

    /// Widens the results panel by 5%, keeping the detail panel at >= 20%.
    pub fn grow_results_panel(&mut self) {
        const MIN_SIDE: u16 = 20;
        const STEP: u16 = 5;
        let transfer = STEP.min(self.right_pct.saturating_sub(MIN_SIDE));
        self.left_pct += transfer;
        self.right_pct -= transfer;
    }

    /// Widens the detail panel by 5%, keeping the results panel at >= 20%.
    pub fn grow_detail_panel(&mut self) {
        const MIN_SIDE: u16 = 20;
        const STEP: u16 = 5;
        let transfer = STEP.min(self.left_pct.saturating_sub(MIN_SIDE));
        self.right_pct += transfer;
        self.left_pct -= transfer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::SearchPayload;
    use reposcout_core::types::SearchResult;

    fn result(name: &str, url: &str) -> SearchResult {
        SearchResult {
            name: name.to_owned(),
            url: url.to_owned(),
            description: String::new(),
            stars: 5,
            forks: 0,
            watchers: 0,
        }
    }

    fn state_with_results(entries: &[(&str, &str)]) -> AppState {
        let mut state = AppState::default();
        state.has_searched = true;
        state.active_query = "q".to_owned();
        state.apply_search_payload(SearchPayload {
            query: "q".to_owned(),
            result: Ok(entries.iter().map(|(n, u)| result(n, u)).collect()),
        });
        state
    }

    #[test]
    fn empty_query_is_a_noop() {
        let mut state = AppState::default();
        state.query_input = "   \t".to_owned();
        state.submit_search();
        assert!(!state.searching);
        assert!(!state.has_searched);
        assert_eq!(state.active_query, "");
    }

    #[test]
    fn submit_clears_previous_results_and_detail() {
        let mut state = state_with_results(&[("A", "http://x/a")]);
        state.select_current();
        assert!(state.detail.is_loading());

        state.query_input = "next".to_owned();
        state.submit_search();
        assert!(state.searching);
        assert!(state.results.is_empty());
        assert!(state.selected.is_empty());
        assert!(matches!(
            state.detail.state(),
            reposcout_core::DetailState::Idle
        ));
    }

    #[test]
    fn zero_results_is_empty_state_not_error() {
        let mut state = AppState::default();
        state.query_input = "nothing".to_owned();
        state.submit_search();
        state.apply_search_payload(SearchPayload {
            query: "nothing".to_owned(),
            result: Ok(Vec::new()),
        });
        assert!(!state.searching);
        assert_eq!(state.results_placeholder(), ResultsPlaceholder::Empty);
    }

    #[test]
    fn search_failure_surfaces_service_message() {
        let mut state = AppState::default();
        state.query_input = "q".to_owned();
        state.submit_search();
        state.apply_search_payload(SearchPayload {
            query: "q".to_owned(),
            result: Err(reposcout_core::ApiError::Status {
                status: reposcout_core::api::StatusCode::INTERNAL_SERVER_ERROR,
                message: Some("db down".to_owned()),
            }),
        });
        assert!(!state.searching, "searching flag must clear on failure");
        match state.results_placeholder() {
            ResultsPlaceholder::Error(msg) => assert!(msg.contains("db down")),
            other => panic!("expected error placeholder, got {other:?}"),
        }
    }

    #[test]
    fn selection_toggles_checkbox_and_tracks_urls() {
        let mut state = state_with_results(&[("A", "http://x/a"), ("B", "http://x/b")]);
        state.select_index(1);
        assert_eq!(state.selected_urls(), vec!["http://x/b".to_owned()]);
        // Selecting again untoggles.
        state.select_index(1);
        assert!(state.selected_urls().is_empty());
    }

    #[test]
    fn rapid_selections_keep_only_the_last_token_live() {
        let mut state = state_with_results(&[("A", "http://x/a"), ("B", "http://x/b")]);
        state.select_index(0);
        let first_token = state.detail.current_token().unwrap();
        state.select_index(1);
        let second_token = state.detail.current_token().unwrap();
        assert!(second_token > first_token);
        assert_eq!(state.detail.current_id(), Some("B"));
    }
}
