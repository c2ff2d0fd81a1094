//! Event handling for the TUI.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::OverlayError;
use crate::tui::app::App;

/// Key help shown on `?`.
pub const HELP_TEXT: &str =
    "1:start | 2:pause | 3:reset | j/k:nav | space:done | d:delete | i:type | t:test/live | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Switch between live chat and test input.
    ToggleMode,
}

/// Handle terminal events.
///
/// Waits at most `timeout` for input so the caller can keep the timer and
/// chat moving. Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<Option<Action>, OverlayError> {
    if event::poll(timeout).map_err(|e| OverlayError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| OverlayError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key, Instant::now()));
            }
        }
    }

    Ok(None)
}

/// Apply a single key press.
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.input.is_some() {
        match key.code {
            KeyCode::Enter => app.submit_input(),
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),

        // Timer
        KeyCode::Char('1') => app.start_timer(now),
        KeyCode::Char('2') => app.pause_timer(),
        KeyCode::Char('3') => app.reset_timer(),

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        // Tasks
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),

        // Chat
        KeyCode::Char('i') => app.begin_input(),
        KeyCode::Char('t') => return Some(Action::ToggleMode),

        KeyCode::Char('?') => app.status = Some(HELP_TEXT.to_string()),

        _ => {}
    }

    None
}
