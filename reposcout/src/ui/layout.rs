//! Responsive layout engine for reposcout.
//!
//! This module is pure layout arithmetic — no mutable application state lives
//! here. It is called inside `terminal.draw()` on every render so every frame
//! gets a fresh layout that automatically reflects the current terminal size.
//!
//! # Panel geometry
//!
//! A 3-row search bar sits on top, a 1-row status bar at the bottom, and the
//! remaining height splits horizontally into the results panel (left) and the
//! detail panel (right) with widths driven by `AppState.left_pct / right_pct`
//! (defaults 40 / 60). Below 80 columns the detail panel collapses and the
//! results list fills the full width.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes adjacent panel borders share a single column and merge their junction
//! box-drawing characters automatically.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Returns `[search_bar, results, detail, status_bar]` `Rect`s for the
/// current frame.
///
/// Called inside `terminal.draw()` on every render. The returned rects are
/// valid only for the current draw closure — never store them across frames
/// (the mouse handler's `panel_rects` cache is refreshed each frame for this
/// reason).
///
/// # Responsive behaviour
///
/// | Terminal width | Layout |
/// |----------------|--------|
/// | `< 80` cols    | Detail panel collapsed; results fill full width |
/// | `>= 80` cols   | Two-panel split using `state.left_pct / right_pct` |
pub fn compute_layout(frame: &Frame, state: &AppState) -> [Rect; 4] {
    let term_width = frame.area().width;

    // Vertical split: search bar, main area, 1-row status bar.
    let [search_bar, main_area, status_bar] = frame.area().layout(&Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    // Horizontal split: collapse the detail panel when the terminal is narrow.
    let horizontal = if term_width >= 80 {
        Layout::horizontal([
            Constraint::Percentage(state.left_pct),
            Constraint::Percentage(state.right_pct),
        ])
        .spacing(Spacing::Overlap(1))
    } else {
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(0)])
            .spacing(Spacing::Overlap(1))
    };

    let [results, detail] = main_area.layout(&horizontal);

    [search_bar, results, detail, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on
/// each side.
///
/// Used to cache viewport heights in `AppState` before panels are rendered,
/// so that half-page and full-page scroll distances are available at keypress
/// time.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// Applies `BorderType::Thick` when the panel is focused and
/// `BorderType::Plain` otherwise. Uses `MergeStrategy::Fuzzy` because `Exact`
/// produces incorrect junctions when mixing `Thick` and `Plain` borders.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Always shows a mode indicator (`NORMAL` or `SEARCH`), a spinner while a
/// request is in flight, and a short key-hint strip. The `p process` hint is
/// shown only when there are results to select from. Overlays display
/// `NORMAL` because the underlying mode is `Normal` — an overlay is a
/// transient visual layer, not a mode change.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Search => (" SEARCH ", theme.status_mode_search),
        Mode::Normal | Mode::HelpOverlay | Mode::SelectedOverlay => {
            (" NORMAL ", theme.status_mode_normal)
        }
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    if state.is_busy() {
        spans.push(Span::styled(
            format!(" {} ", state.spinner_glyph()),
            Style::default().fg(theme.loading),
        ));
    }

    let mut hints = String::from("  / search  j/k move  Enter details  Space select");
    if !state.results.is_empty() {
        hints.push_str("  p process");
    }
    hints.push_str("  ? help  q quit");
    spans.push(Span::raw(hints));

    let status_line = Line::from(spans);

    frame.render_widget(
        Paragraph::new(status_line)
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
