//! Results panel renderer for reposcout.
//!
//! Renders the left panel as a list of project cards from `AppState.results`.
//! Each card shows a checkbox mark, the project name, a truncated description,
//! and a right-aligned stats region (stars, forks, watchers). When the result
//! list is empty the panel shows one of four placeholders depending on how it
//! got empty (never searched, search in flight, zero hits, search error).

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use reposcout_core::types::SearchResult;

use crate::app::{AppState, PanelFocus, ResultsPlaceholder};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Width in columns of the right-aligned stats region on each card.
///
/// The mouse handler uses this to decide whether a hover falls on the stats
/// columns (which opens the star-history popup).
pub const STATS_WIDTH: u16 = 27;

/// Renders the results left panel.
///
/// Uses `render_stateful_widget` so the ListState selection highlight is
/// applied. Result count is shown in the panel title (e.g. "Results (12)").
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    focus: PanelFocus,
    state: &mut AppState,
    theme: &Theme,
) {
    let is_focused = focus == PanelFocus::Results;
    let count = state.results.len();
    let title = if count > 0 {
        format!("Results ({})", count)
    } else {
        "Results".to_owned()
    };
    let block = panel_block(&title, is_focused, theme);
    let inner_width = inner_rect(area).width;

    let items: Vec<ListItem> = if state.results.is_empty() {
        vec![placeholder_item(state, theme)]
    } else {
        state
            .results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let checked = state.selected.get(i).copied().unwrap_or(false);
                result_card(r, checked, inner_width, theme)
            })
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.border_active));

    frame.render_stateful_widget(list, area, &mut state.results_state);
}

/// Builds the single-line placeholder shown when the result list is empty.
fn placeholder_item(state: &AppState, theme: &Theme) -> ListItem<'static> {
    let line = match state.results_placeholder() {
        ResultsPlaceholder::Pristine => Line::styled(
            "Type / to search for projects",
            Style::default().fg(theme.placeholder),
        ),
        ResultsPlaceholder::Searching => Line::styled(
            format!("{} Searching...", state.spinner_glyph()),
            Style::default().fg(theme.loading),
        ),
        ResultsPlaceholder::Empty => Line::styled(
            "No matching projects found.",
            Style::default().fg(theme.placeholder),
        ),
        ResultsPlaceholder::Error(msg) => {
            Line::styled(msg, Style::default().fg(theme.error))
        }
    };
    ListItem::new(line)
}

/// Converts a search result into a styled one-line card.
///
/// Format: `[x] name  description...          ★ 1234 ⑂ 56 ◉ 7`. The name and
/// description are truncated so the stats region keeps its fixed width at the
/// right edge of the panel.
fn result_card(
    result: &SearchResult,
    checked: bool,
    inner_width: u16,
    theme: &Theme,
) -> ListItem<'static> {
    let mark = if checked {
        Span::styled("[x] ", Style::default().fg(theme.checked_mark))
    } else {
        Span::styled("[ ] ", Style::default().fg(theme.unchecked_mark))
    };

    let stats = format!(
        "★ {:>6} ⑂ {:>5} ◉ {:>5}",
        compact(result.stars),
        compact(result.forks),
        compact(result.watchers),
    );

    // Columns left for name + description after mark and stats.
    let text_width = (inner_width as usize)
        .saturating_sub(4)
        .saturating_sub(STATS_WIDTH as usize);

    let name = truncate(&result.name, text_width.min(30));
    let name_len = name.chars().count();
    let desc_width = text_width.saturating_sub(name_len + 2);
    let desc = truncate(result.description_or_fallback(), desc_width);

    // Pad so the stats region is right-aligned regardless of text length.
    let used = name_len + 2 + desc.chars().count();
    let pad = " ".repeat(text_width.saturating_sub(used));

    ListItem::new(Line::from(vec![
        mark,
        Span::styled(name, Style::default().fg(theme.card_title)),
        Span::raw("  "),
        Span::styled(desc, Style::default().fg(theme.card_description)),
        Span::raw(pad),
        Span::styled(stats, Style::default().fg(theme.stat_stars)),
    ]))
}

/// Truncates a string to `max` characters, appending `...` when cut.
fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let count = s.chars().count();
    if count <= max {
        return s.to_owned();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let kept: String = s.chars().take(max - 3).collect();
    format!("{}...", kept)
}

/// Formats a count compactly: 999 stays as-is, 12 345 becomes `12.3k`.
fn compact(n: u64) -> String {
    if n < 1_000 {
        n.to_string()
    } else if n < 1_000_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate("tokio", 30), "tokio");
    }

    #[test]
    fn truncate_appends_ellipsis_when_cutting() {
        assert_eq!(truncate("a very long description here", 10), "a very ...");
    }

    #[test]
    fn compact_scales_counts() {
        assert_eq!(compact(999), "999");
        assert_eq!(compact(12_345), "12.3k");
        assert_eq!(compact(2_500_000), "2.5M");
    }
}
