//! UI rendering module for reposcout.
//!
//! This is the module root for `ui/`. It re-exports `render()` as the single
//! entry point called by the event loop's `terminal.draw()` closure.
//!
//! All layout arithmetic lives in `layout.rs`. Result-card rendering lives in
//! `results.rs` and detail-pane rendering in `detail.rs`. Overlays (help,
//! selected projects, star-history popup) are drawn last so they sit on top.

mod layout;
pub mod detail;
pub mod help;
pub mod keybindings;
pub mod results;
pub mod selected;
pub mod star_popup;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame: search bar, both panels, status bar, overlays.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()`. This
/// is the only location where `terminal.draw()` content is produced.
///
/// After computing the layout, viewport heights and panel rects are written
/// back into `state` so that scroll distances and mouse hit testing for the
/// *next* input event are computed against current geometry. The one-frame
/// lag is imperceptible in practice.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    // Paint the themed background before any panel so gaps between widgets
    // pick up the theme color instead of the terminal default.
    frame.render_widget(
        Block::new().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    let [search_bar, results, detail, status_bar] = compute_layout(frame, state);

    // Cache geometry BEFORE rendering panels so it is available for the next
    // input cycle. inner_rect() strips the 1-cell border on each side.
    state.results_viewport_height = inner_rect(results).height;
    state.detail_viewport_height = inner_rect(detail).height;
    state.panel_rects = [results, detail];

    let focus = state.focus;

    render_search_bar(frame, search_bar, state, theme);

    results::render_results(frame, results, focus, state, theme);

    // Right panel: skip rendering when collapsed on narrow terminals.
    if detail.width > 0 {
        detail::render_detail(frame, detail, focus, state, theme);
    }

    render_status_bar(frame, status_bar, state, theme);

    // Overlays are rendered after all panels so they sit on top. Clear is
    // called inside each overlay to erase the background.
    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::SelectedOverlay => selected::render_selected_overlay(frame, state, theme),
        Mode::Normal | Mode::Search => {}
    }

    if state.mode == Mode::Normal {
        if let Some(popup) = state.star_popup {
            star_popup::render_star_popup(frame, &popup, state, theme);
        }
    }
}

/// Renders the 3-row search bar at the top of the terminal.
///
/// The border switches to the active search color while the query is being
/// edited, and a trailing `▏` cursor marks the insertion point.
fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.mode == Mode::Search;
    let (border_color, border_type) = if editing {
        (theme.search_active, BorderType::Thick)
    } else {
        (theme.border_inactive, BorderType::Plain)
    };

    let block = Block::bordered()
        .title("Search")
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));

    let text = if editing {
        format!("{}▏", state.query_input)
    } else if state.query_input.is_empty() {
        "Press / to search".to_owned()
    } else {
        state.query_input.clone()
    };
    let color = if editing || !state.query_input.is_empty() {
        theme.search_input
    } else {
        theme.placeholder
    };

    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(block),
        area,
    );
}
