//! Keybinding dispatcher for reposcout.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and returns
//! a `KeyAction` telling the event loop whether to continue or quit. The
//! dispatcher branches first on `state.mode` so that Search, HelpOverlay,
//! SelectedOverlay, and Normal all have isolated handler functions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus, StarPopup};
use crate::ui::layout::inner_rect;
use crate::ui::results::STATS_WIDTH;

/// Control-flow signal returned from the key dispatcher.
///
/// The event loop checks this after every keypress: `Quit` tears down the
/// terminal and exits; `Continue` immediately requests another render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// Mutates `state` in place and returns a `KeyAction` signalling whether to
/// continue or quit.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::SelectedOverlay => handle_selected_overlay(key, state),
        Mode::Search => handle_search(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Normal mode.
///
/// Delegates scroll keys to `handle_scroll_key` and handles selection, focus,
/// panel resize, and mode transitions inline.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        // Selection: load details for the card under the cursor.
        KeyCode::Enter | KeyCode::Char('l') if state.focus == PanelFocus::Results => {
            state.select_current();
            KeyAction::Continue
        }
        // Toggle the checkbox without loading details.
        KeyCode::Char(' ') if state.focus == PanelFocus::Results => {
            state.toggle_checked_current();
            KeyAction::Continue
        }

        // Enter search mode. The input buffer keeps its previous text so the
        // query can be edited rather than retyped.
        KeyCode::Char('/') | KeyCode::Char('i') => {
            state.mode = Mode::Search;
            KeyAction::Continue
        }

        // Panel focus
        KeyCode::Tab | KeyCode::Char('H') | KeyCode::Char('L') => {
            state.focus = state.focus.toggle();
            KeyAction::Continue
        }

        // Panel resize
        KeyCode::Char('<') => {
            state.grow_results_panel();
            KeyAction::Continue
        }
        KeyCode::Char('>') => {
            state.grow_detail_panel();
            KeyAction::Continue
        }

        // Selected-projects overlay; meaningless without results.
        KeyCode::Char('p') if !state.results.is_empty() => {
            state.mode = Mode::SelectedOverlay;
            KeyAction::Continue
        }

        // Help overlay
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }

        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,

        _ => KeyAction::Continue,
    }
}

/// Handles scroll-related keys in Normal mode: j / k / g / G and Ctrl combos.
///
/// Returns `Some(KeyAction)` when the key was consumed, `None` when the key
/// should fall through to the rest of the Normal handler.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.scroll_down(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.scroll_up(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('g') => {
            state.scroll_top();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('G') => {
            state.scroll_bottom();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('d') if ctrl => {
            state.half_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('u') if ctrl => {
            state.half_page_up();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('f') if ctrl => {
            state.full_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('b') if ctrl => {
            state.full_page_up();
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Search mode
// ---------------------------------------------------------------------------

/// Handles a key event while the search bar is being edited.
///
/// `Enter` submits the query; an empty or whitespace-only buffer is a no-op
/// and leaves the mode unchanged. `Esc` cancels back to Normal mode without
/// issuing a request.
fn handle_search(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            state.submit_search();
            KeyAction::Continue
        }
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        KeyCode::Backspace => {
            state.query_input.pop();
            KeyAction::Continue
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.query_input.push(c);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Handles a key event while the help overlay is visible.
///
/// `?`, `Esc`, or `q` dismisses the overlay and returns to Normal mode.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => {
            state.help_scroll = state.help_scroll.saturating_add(1);
            KeyAction::Continue
        }
        KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
            KeyAction::Continue
        }
        KeyCode::Char('g') => {
            state.help_scroll = 0;
            KeyAction::Continue
        }
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// SelectedOverlay mode
// ---------------------------------------------------------------------------

/// Handles a key event while the selected-projects overlay is visible.
///
/// `Enter` dispatches the processing request for the checked cards (a no-op
/// when nothing is checked or a request is already pending). `p`, `Esc`, or
/// `q` dismisses the overlay; any completed status message stays available
/// for the next time it opens.
fn handle_selected_overlay(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            state.submit_process_selected();
            KeyAction::Continue
        }
        KeyCode::Char('p') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event: click-to-select, hover popups, and scroll wheel.
///
/// Left click on a panel sets focus to it; clicking a result card also
/// selects it. Moving the pointer over a card's stats columns shows the
/// star-history popup; moving anywhere else hides it. Scroll wheel moves the
/// focused panel by 3 lines.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_mouse_click(mouse.column, mouse.row, state)
        }
        MouseEventKind::Moved => handle_mouse_move(mouse.column, mouse.row, state),
        MouseEventKind::ScrollUp => handle_mouse_scroll_up(state),
        MouseEventKind::ScrollDown => handle_mouse_scroll_down(state),
        _ => KeyAction::Continue,
    }
}

/// Maps a position inside the results panel to a card index, accounting for
/// the list widget's scroll offset. `None` when the row is below the last
/// card or the panel has no results.
fn card_at(col: u16, row: u16, state: &AppState) -> Option<usize> {
    let inner = inner_rect(state.panel_rects[0]);
    if !inner.contains(Position { x: col, y: row }) {
        return None;
    }
    let index = state.results_state.offset() + (row - inner.y) as usize;
    if index < state.results.len() {
        Some(index)
    } else {
        None
    }
}

/// Sets focus from the clicked position; a click on a card also selects it.
///
/// Panels with zero width are skipped so a collapsed detail panel cannot
/// receive focus via click.
fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) -> KeyAction {
    let pos = Position { x: col, y: row };
    let [results, detail] = state.panel_rects;

    if results.width > 0 && results.contains(pos) {
        state.focus = PanelFocus::Results;
        if let Some(index) = card_at(col, row, state) {
            state.select_index(index);
        }
    } else if detail.width > 0 && detail.contains(pos) {
        state.focus = PanelFocus::Detail;
    }

    KeyAction::Continue
}

/// Shows or hides the star-history popup based on the hover position.
///
/// The popup appears only while the pointer rests on the stats columns of an
/// actual card row. Everything else clears it.
fn handle_mouse_move(col: u16, row: u16, state: &mut AppState) -> KeyAction {
    let inner = inner_rect(state.panel_rects[0]);
    let stats_left = inner.right().saturating_sub(STATS_WIDTH);

    state.star_popup = match card_at(col, row, state) {
        Some(index) if col >= stats_left => Some(StarPopup { index, x: col, y: row }),
        _ => None,
    };

    KeyAction::Continue
}

/// Scrolls up by 3 lines. Scrolls the help overlay when in HelpOverlay mode.
fn handle_mouse_scroll_up(state: &mut AppState) -> KeyAction {
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = state.help_scroll.saturating_sub(3);
    } else {
        state.scroll_up(3);
    }
    KeyAction::Continue
}

/// Scrolls down by 3 lines. Scrolls the help overlay when in HelpOverlay mode.
fn handle_mouse_scroll_down(state: &mut AppState) -> KeyAction {
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = state.help_scroll.saturating_add(3);
    } else {
        state.scroll_down(3);
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn slash_enters_search_mode_and_esc_leaves_it() {
        let mut state = AppState::default();
        assert_eq!(handle_key(key(KeyCode::Char('/')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Search);
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn typing_in_search_mode_edits_the_buffer() {
        let mut state = AppState::default();
        state.mode = Mode::Search;
        handle_key(key(KeyCode::Char('r')), &mut state);
        handle_key(key(KeyCode::Char('s')), &mut state);
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.query_input, "r");
    }

    #[test]
    fn empty_submit_stays_in_search_mode() {
        let mut state = AppState::default();
        state.mode = Mode::Search;
        state.query_input = "   ".to_owned();
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(state.mode, Mode::Search);
        assert!(!state.searching);
    }

    #[test]
    fn process_overlay_requires_results() {
        let mut state = AppState::default();
        handle_key(key(KeyCode::Char('p')), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn q_quits_from_normal_mode_but_not_from_overlays() {
        let mut state = AppState::default();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Quit);

        state.mode = Mode::HelpOverlay;
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Normal);
    }
}
