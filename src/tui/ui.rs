//! UI rendering for the TUI.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::features::chat::ConnectionStatus;
use crate::features::timer::{Phase, TimerState};
use crate::tui::app::App;
use crate::tui::event::HELP_TEXT;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let input_height = if app.input.is_some() { 3 } else { 0 };

    // Create layout: header, body, input, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(0),               // Body
            Constraint::Length(input_height), // Input
            Constraint::Length(1),            // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(body[0]);

    render_header(frame, app, chunks[0]);
    render_timer(frame, app, left[0]);
    render_tasks(frame, app, left[1]);
    render_chat(frame, app, body[1]);
    if app.input.is_some() {
        render_input(frame, app, chunks[2]);
    }
    render_status_bar(frame, app, chunks[3]);
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mode = if app.test_mode { "TEST" } else { "LIVE" };
    let connection_color = match app.connection {
        ConnectionStatus::Connected(_) => Color::Green,
        ConnectionStatus::Connecting | ConnectionStatus::Disconnected => Color::Yellow,
        ConnectionStatus::Error(_) => Color::Red,
        ConnectionStatus::TestMode | ConnectionStatus::NotConfigured => Color::DarkGray,
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Study Overlay ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{mode}] "), Style::default().fg(Color::Magenta)),
        Span::styled(app.connection.to_string(), Style::default().fg(connection_color)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Render the countdown and progress gauge.
fn render_timer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = &app.timer;
    let phase_color = match timer.phase() {
        Phase::Work => Color::Red,
        Phase::Break => Color::Green,
    };
    let border_color = if app.is_flashing(Instant::now()) {
        Color::Yellow
    } else {
        phase_color
    };
    let state = match timer.state() {
        TimerState::Idle => "ready",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
    };

    let block = Block::default()
        .title(format!(" {} ({state}) ", timer.phase().display_name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1)])
        .split(inner);

    let clock = Paragraph::new(timer.format_remaining())
        .alignment(Alignment::Center)
        .style(Style::default().fg(phase_color).add_modifier(Modifier::BOLD));
    frame.render_widget(clock, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(phase_color))
        .ratio(timer.progress().clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, rows[1]);
}

/// Render the task list.
fn render_tasks(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .tasks
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let (icon, icon_color) = if task.done {
                ("[x]", Color::Green)
            } else {
                ("[ ]", Color::White)
            };
            let text_style = if task.done {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{icon} "), Style::default().fg(icon_color)),
                Span::styled(task.text.as_str(), text_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Tasks ({}) ", app.tasks.counter_text()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !app.tasks.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the chat feed, newest at the bottom.
fn render_chat(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let lines: Vec<Line<'_>> = app
        .chat
        .messages()
        .map(|message| {
            let name_color = if message.username == "System" {
                Color::Yellow
            } else {
                Color::Cyan
            };
            Line::from(vec![
                Span::styled(
                    message.received_at.format("%H:%M ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{}: ", message.username),
                    Style::default().fg(name_color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(message.text.as_str()),
            ])
        })
        .collect();

    // Scroll by wrapped rows so the newest message stays on screen
    let chat = Paragraph::new(lines).wrap(Wrap { trim: false });
    let visible = usize::from(area.height.saturating_sub(2));
    let rows = chat.line_count(area.width.saturating_sub(2));
    let offset = u16::try_from(rows.saturating_sub(visible)).unwrap_or(u16::MAX);

    let chat = chat
        .scroll((offset, 0))
        .block(
            Block::default()
                .title(" Chat ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        );

    frame.render_widget(chat, area);
}

/// Render the message input line.
fn render_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = app.input.as_deref().unwrap_or_default();
    let input = Paragraph::new(format!("{text}_")).block(
        Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(input, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP_TEXT);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
