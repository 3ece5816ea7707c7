//! Selected-projects overlay for reposcout.
//!
//! Opened with `p` from normal mode, this modal lists the URLs of every
//! checked card and lets the user send them to the processing endpoint with
//! Enter. The request's progress is shown inside the same overlay.

use ratatui::{
    Frame,
    layout::Constraint,
    style::Style,
    text::Line,
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::app::{AppState, ProcessStatus};
use crate::theme::Theme;

/// Renders the selected-projects overlay as a centred modal.
///
/// Skipped on terminals narrower than 60 columns, matching the help overlay.
pub fn render_selected_overlay(frame: &mut Frame, state: &AppState, theme: &Theme) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(60));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Selected projects  — Enter process, p or Esc to dismiss ")
        .border_style(Style::default().fg(theme.border_active));

    let urls = state.selected_urls();
    let mut lines: Vec<Line<'static>> = Vec::new();

    if urls.is_empty() {
        lines.push(Line::styled(
            "No projects selected.",
            Style::default().fg(theme.placeholder),
        ));
    } else {
        for url in &urls {
            lines.push(Line::styled(
                format!("  {}", url),
                Style::default().fg(theme.field_value),
            ));
        }
    }

    if let Some(status) = &state.process_status {
        lines.push(Line::raw(""));
        lines.push(match status {
            ProcessStatus::Pending => Line::styled(
                format!("{} Processing...", state.spinner_glyph()),
                Style::default().fg(theme.loading),
            ),
            ProcessStatus::Done(message) => {
                Line::styled(message.clone(), Style::default().fg(theme.success))
            }
            ProcessStatus::Failed(message) => Line::styled(
                format!("Error processing selected projects: {}", message),
                Style::default().fg(theme.error),
            ),
        });
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        overlay_area,
    );
}
