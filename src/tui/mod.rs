//! Terminal User Interface (TUI) for the overlay.
//!
//! Timer, task list and chat feed side by side, built with ratatui and
//! crossterm. All widget state lives on this thread; the live chat worker
//! only sends events.

mod app;
mod event;
mod ui;

pub use app::{App, OverlaySettings};

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::OverlayError;
use crate::features::tasks::TaskList;

/// Longest wait for input between redraws.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Run the overlay until the user quits.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(settings: OverlaySettings, tasks: TaskList) -> Result<(), OverlayError> {
    let mut app = App::new(settings, tasks);
    app.connect()?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| OverlayError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| OverlayError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| OverlayError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend + Write>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), OverlayError> {
    loop {
        app.drain_chat_events();
        app.on_tick(Instant::now());

        if app.take_bell() {
            ring_bell(terminal.backend_mut())?;
        }

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| OverlayError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app, FRAME_INTERVAL)? {
            match action {
                event::Action::Quit => break,
                event::Action::ToggleMode => app.toggle_mode(),
            }
        }
    }

    Ok(())
}

/// Write the terminal bell and push it out immediately.
fn ring_bell<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_bell_writes_bel() {
        let mut out = Vec::new();
        ring_bell(&mut out).unwrap();
        assert_eq!(out, b"\x07");
    }

    #[test]
    fn test_ring_bell_flushes_buffered_writer() {
        let mut out = io::BufWriter::new(Vec::new());
        ring_bell(&mut out).unwrap();
        assert_eq!(out.buffer().len(), 0);
        assert_eq!(out.get_ref().as_slice(), b"\x07");
    }
}
