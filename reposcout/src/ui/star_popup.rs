//! Star-history hover popup for reposcout.
//!
//! When the mouse rests on the stats region of a result card, a small
//! floating box appears near the pointer with links to the project's
//! star-history chart. Showing and hiding the popup is pure UI state; no
//! network request is made.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use url::Url;

use crate::app::{AppState, StarPopup};
use crate::theme::Theme;

/// Renders the popup anchored near the hover position.
///
/// Drawn last in the frame so it sits above the panels. The box is clamped to
/// the frame edges so hovering near the right margin never pushes it off
/// screen.
pub fn render_star_popup(frame: &mut Frame, popup: &StarPopup, state: &AppState, theme: &Theme) {
    let Some(result) = state.results.get(popup.index) else {
        return;
    };

    let lines: Vec<Line<'static>> = match repo_path_from_url(&result.url) {
        Some(path) => vec![
            Line::styled(
                "Star history",
                Style::default().fg(theme.section_heading),
            ),
            Line::from(vec![
                Span::styled("Page:  ", Style::default().fg(theme.field_label)),
                Span::styled(
                    format!("https://www.star-history.com/#{}&Date", path),
                    Style::default().fg(theme.field_value),
                ),
            ]),
            Line::from(vec![
                Span::styled("Chart: ", Style::default().fg(theme.field_label)),
                Span::styled(
                    format!("https://api.star-history.com/svg?repos={}&type=Date", path),
                    Style::default().fg(theme.field_value),
                ),
            ]),
        ],
        None => vec![Line::styled(
            "No chart link for this project",
            Style::default().fg(theme.placeholder),
        )],
    };

    let width = lines
        .iter()
        .map(|l| l.width() as u16)
        .max()
        .unwrap_or(0)
        .saturating_add(4);
    let height = lines.len() as u16 + 2;

    let frame_area = frame.area();
    let x = popup.x.saturating_add(2).min(frame_area.width.saturating_sub(width));
    let y = popup.y.saturating_add(1).min(frame_area.height.saturating_sub(height));
    let area = Rect::new(x, y, width.min(frame_area.width), height.min(frame_area.height));

    frame.render_widget(Clear, area);
    let block = Block::bordered().border_style(Style::default().fg(theme.border_active));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Extracts the `owner/repo` path from a project URL.
///
/// Returns `None` when the URL does not parse or has fewer than two path
/// segments, in which case the popup shows a no-link message instead.
pub fn repo_path_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;
    Some(format!("{}/{}", owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_owner_and_repo_from_github_url() {
        assert_eq!(
            repo_path_from_url("https://github.com/tokio-rs/tokio"),
            Some("tokio-rs/tokio".to_owned())
        );
    }

    #[test]
    fn ignores_extra_path_segments() {
        assert_eq!(
            repo_path_from_url("https://github.com/tokio-rs/tokio/tree/master"),
            Some("tokio-rs/tokio".to_owned())
        );
    }

    #[test]
    fn rejects_urls_without_a_repo_path() {
        assert_eq!(repo_path_from_url("https://github.com/"), None);
        assert_eq!(repo_path_from_url("not a url"), None);
    }
}
