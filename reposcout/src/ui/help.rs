//! Help overlay renderer for reposcout.
//!
//! Provides `render_help_overlay()` which draws a centred modal box over the
//! panel layout using ratatui's `Clear` widget to erase the background first.
//! The overlay is rendered inside the same `terminal.draw()` closure as all
//! other panels.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal on top of the panel layout.
///
/// Erases the overlay area with `Clear`, then draws a bordered `Paragraph`
/// containing all keybinding descriptions. The paragraph scrolls vertically
/// by `help_scroll` rows for short terminals.
///
/// Skipped entirely when the terminal is narrower than 60 columns to avoid a
/// zero-height `Rect` panic.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    // Erase the background behind the modal before drawing content.
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  — j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Builds the help text as a multi-line `Text` value.
fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Search"),
        Line::from("  / or i        Edit the search query"),
        Line::from("  Enter         Run the search (empty query does nothing)"),
        Line::from("  Esc           Leave search mode without searching"),
        Line::from(""),
        Line::from("Results"),
        Line::from("  j / k         Move the cursor down / up one card"),
        Line::from("  Enter / l     Select the card and load its details"),
        Line::from("  Space         Toggle the card's checkbox only"),
        Line::from("  Click         Select the clicked card"),
        Line::from("  Hover stats   Show the star-history chart link"),
        Line::from(""),
        Line::from("Details"),
        Line::from("  Tab / H / L   Move focus between panels"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  Ctrl-f / b    Scroll full page down / up"),
        Line::from("  < / >         Shrink / grow the detail panel by 5%"),
        Line::from(""),
        Line::from("Processing"),
        Line::from("  p             Review selected projects (needs results)"),
        Line::from("  Enter         Send the selected projects for processing"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit"),
    ])
}
