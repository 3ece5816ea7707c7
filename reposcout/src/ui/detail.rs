//! Detail panel renderer for reposcout.
//!
//! Renders the right panel using a List widget with manual virtual scrolling:
//! only `lines[scroll..scroll+viewport_height]` are materialized per frame, so
//! rendering stays O(viewport) regardless of how long the detail report is.
//!
//! Line construction is separated from rendering: `build_detail_lines` runs
//! once when an accepted payload arrives and the result is cached in
//! `AppState.detail_lines`. The per-frame path only slices and clones spans.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use reposcout_core::selection::DetailState;
use reposcout_core::types::{language_breakdown, ProjectDetail};

use crate::app::{AppState, PanelFocus};
use crate::theme::{language_color, Theme};
use crate::ui::layout::{inner_rect, panel_block};

/// Width in cells of the proportional language bar.
const LANGUAGE_BAR_WIDTH: usize = 40;

/// Renders the detail right panel.
///
/// `Idle`, `Loading`, and `Failed` render a short message derived from the
/// pane state; `Ready` renders the visible window of the cached lines.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    focus: PanelFocus,
    state: &AppState,
    theme: &Theme,
) {
    let is_focused = focus == PanelFocus::Detail;
    let block = panel_block("Details", is_focused, theme);
    let inner = inner_rect(area);
    let viewport_height = inner.height as usize;

    frame.render_widget(block, area);

    match state.detail.state() {
        DetailState::Idle => {
            let msg = Line::styled(
                "Select a project to see details",
                Style::default().fg(theme.placeholder),
            );
            frame.render_widget(List::new(vec![ListItem::new(msg)]), inner);
        }
        DetailState::Loading { .. } => {
            let msg = Line::styled(
                format!("{} Summarizing...", state.spinner_glyph()),
                Style::default().fg(theme.loading),
            );
            frame.render_widget(List::new(vec![ListItem::new(msg)]), inner);
        }
        DetailState::Failed { message, .. } => {
            let msg = Line::styled(
                format!("Error loading project details: {}", message),
                Style::default().fg(theme.error),
            );
            frame.render_widget(List::new(vec![ListItem::new(msg)]), inner);
        }
        DetailState::Ready { .. } => {
            let total = state.detail_lines.len();
            let start = state.detail_scroll.min(total.saturating_sub(1));
            let end = (start + viewport_height).min(total);

            let items: Vec<ListItem> = state.detail_lines[start..end]
                .iter()
                .map(|l| ListItem::new(l.clone()))
                .collect();
            frame.render_widget(List::new(items), inner);
        }
    }
}

/// Builds the full set of detail lines for an accepted payload.
///
/// Called once per accepted detail payload, never per frame. Sections whose
/// source data is absent (no languages, no analysis block) are omitted
/// entirely rather than rendered empty.
pub fn build_detail_lines(detail: &ProjectDetail, theme: &Theme) -> Vec<Line<'static>> {
    let label = Style::default().fg(theme.field_label);
    let value = Style::default().fg(theme.field_value);
    let heading = Style::default()
        .fg(theme.section_heading)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line<'static>> = Vec::new();

    // Stats row
    lines.push(Line::from(vec![
        Span::styled("★ ", Style::default().fg(theme.stat_stars)),
        Span::styled(detail.stars.to_string(), value),
        Span::raw("   "),
        Span::styled("⑂ ", Style::default().fg(theme.stat_forks)),
        Span::styled(detail.forks.to_string(), value),
        Span::raw("   "),
        Span::styled("◉ ", Style::default().fg(theme.stat_watchers)),
        Span::styled(detail.watchers.to_string(), value),
    ]));
    lines.push(Line::raw(""));

    // Dates
    if !detail.created_at.is_empty() {
        lines.push(field_line("Created: ", detail.created_at.clone(), label, value));
    }
    if !detail.last_commit.is_empty() {
        lines.push(field_line("Last commit: ", detail.last_commit.clone(), label, value));
    }
    if !detail.created_at.is_empty() || !detail.last_commit.is_empty() {
        lines.push(Line::raw(""));
    }

    // Description
    lines.push(Line::styled("Description", heading));
    lines.push(Line::styled(detail.description_or_fallback().to_owned(), value));
    lines.push(Line::raw(""));

    // Languages
    let shares = language_breakdown(&detail.languages);
    if !shares.is_empty() {
        lines.push(Line::styled("Languages", heading));

        // Proportional bar: fixed total width, one colored segment per
        // language. Rounding can leave a cell or two short; the largest
        // segment absorbs the remainder.
        let mut widths: Vec<usize> = shares
            .iter()
            .map(|s| (s.percent / 100.0 * LANGUAGE_BAR_WIDTH as f64).round() as usize)
            .collect();
        let assigned: usize = widths.iter().sum();
        if let Some(first) = widths.first_mut() {
            *first = (*first + LANGUAGE_BAR_WIDTH.saturating_sub(assigned))
                .min(LANGUAGE_BAR_WIDTH);
        }
        let bar: Vec<Span<'static>> = widths
            .iter()
            .enumerate()
            .filter(|(_, &w)| w > 0)
            .map(|(i, &w)| {
                Span::styled("█".repeat(w), Style::default().fg(language_color(i)))
            })
            .collect();
        lines.push(Line::from(bar));

        for (i, share) in shares.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(language_color(i))),
                Span::styled(share.name.clone(), value),
                Span::styled(format!("  {:.1}%", share.percent), label),
            ]));
        }
        lines.push(Line::raw(""));
    }

    // Analysis
    if let Some(analysis) = &detail.analysis {
        lines.push(Line::styled("Analysis", heading));
        lines.push(field_line(
            "Activity score: ",
            format!("{:.1}", analysis.activity_score),
            label,
            value,
        ));
        lines.push(field_line(
            "Code quality: ",
            format!("{:.1}", analysis.code_quality_score),
            label,
            value,
        ));
        if !analysis.complexity_level.is_empty() {
            lines.push(field_line("Complexity: ", analysis.complexity_level.clone(), label, value));
        }
        if !analysis.maintenance_status.is_empty() {
            lines.push(field_line(
                "Maintenance: ",
                analysis.maintenance_status.clone(),
                label,
                value,
            ));
        }
        lines.push(Line::raw(""));
    }

    // Category
    if let Some(category) = &detail.category {
        lines.push(Line::styled("Category", heading));
        if !category.primary_category.is_empty() {
            lines.push(field_line("Primary: ", category.primary_category.clone(), label, value));
        }
        if !category.secondary_categories.is_empty() {
            lines.push(field_line(
                "Secondary: ",
                category.secondary_categories.join(", "),
                label,
                value,
            ));
        }
        if !category.tags.is_empty() {
            let mut spans = vec![Span::styled("Tags: ", label)];
            for tag in &category.tags {
                spans.push(Span::styled(
                    format!("[{}] ", tag),
                    Style::default().fg(theme.tag),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
    }

    // Report
    if let Some(report) = &detail.report {
        lines.push(Line::styled("Report", heading));
        let filled = report.star_count();
        let rating = format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled));
        lines.push(Line::from(vec![
            Span::styled("Rating: ", label),
            Span::styled(rating, Style::default().fg(theme.rating_star)),
        ]));
        if !report.summary.is_empty() {
            lines.push(Line::styled(report.summary.clone(), value));
        }
        if !report.recommendation_reason.is_empty() {
            lines.push(field_line(
                "Why recommended: ",
                report.recommendation_reason.clone(),
                label,
                value,
            ));
        }
    }

    // Drop a trailing blank line so scroll_bottom lands on content.
    while lines.last().is_some_and(|l| l.width() == 0) {
        lines.pop();
    }

    lines
}

fn field_line(
    name: &'static str,
    text: String,
    label: Style,
    value: Style,
) -> Line<'static> {
    Line::from(vec![Span::styled(name, label), Span::styled(text, value)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn detail_json(json: &str) -> ProjectDetail {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_payload_builds_stats_and_description() {
        let detail = detail_json(r#"{"stars":10,"forks":2,"watchers":1}"#);
        let lines = build_detail_lines(&detail, &Theme::dark());
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l.contains("10")));
        assert!(text.iter().any(|l| l.contains("No description available")));
        assert!(!text.iter().any(|l| l.contains("Languages")));
        assert!(!text.iter().any(|l| l.contains("Analysis")));
    }

    #[test]
    fn language_section_lists_shares_in_descending_order() {
        let mut languages = BTreeMap::new();
        languages.insert("Rust".to_owned(), 75u64);
        languages.insert("Shell".to_owned(), 25u64);
        let detail = ProjectDetail {
            languages,
            ..detail_json("{}")
        };
        let lines = build_detail_lines(&detail, &Theme::dark());
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        let rust = text.iter().position(|l| l.contains("Rust")).unwrap();
        let shell = text.iter().position(|l| l.contains("Shell")).unwrap();
        assert!(rust < shell);
        assert!(text[rust].contains("75.0%"));
    }

    #[test]
    fn report_rating_renders_filled_and_hollow_stars() {
        let detail = detail_json(
            r#"{"report_result":{"rating":"⭐️⭐️⭐️","summary":"solid","recommendation_reason":"active"}}"#,
        );
        let lines = build_detail_lines(&detail, &Theme::dark());
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l.contains("★★★☆☆")));
        assert!(text.iter().any(|l| l.contains("solid")));
    }
}
