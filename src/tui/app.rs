//! Application state for the overlay.
//!
//! `App` is the composition root: it owns the timer, the task list and the
//! chat feed, and wires chat commands into the task list explicitly.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::OverlayError;
use crate::features::chat::{
    spawn_chat_worker, ChatClientConfig, ChatEvent, ChatFeed, ConnectionStatus,
};
use crate::features::tasks::TaskList;
use crate::features::timer::{describe_seconds, PhaseChange, SessionTimer, Ticker};

/// How long the timer panel stays highlighted after a phase change.
const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Username for the overlay's own hint messages.
const SYSTEM_USER: &str = "System";

/// Startup settings resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct OverlaySettings {
    /// Work phase length in seconds.
    pub work_seconds: u32,
    /// Break phase length in seconds.
    pub break_seconds: u32,
    /// Chat messages kept on screen.
    pub history: usize,
    /// Command prefix for task commands.
    pub command_prefix: String,
    /// Sender name for manually typed messages.
    pub test_username: String,
    /// Live connection settings; `None` when no channel is configured.
    pub chat: Option<ChatClientConfig>,
    /// Start with the live connection disabled.
    pub test_mode: bool,
}

/// Application state.
pub struct App {
    /// Work/break countdown.
    pub timer: SessionTimer,
    ticker: Ticker,
    /// Task list.
    pub tasks: TaskList,
    /// Recent chat messages.
    pub chat: ChatFeed,
    /// Live connection state.
    pub connection: ConnectionStatus,
    /// Whether messages come from manual input instead of Twitch.
    pub test_mode: bool,
    /// Currently selected task.
    pub selected: usize,
    /// Message being typed, when the input line is open.
    pub input: Option<String>,
    /// Status message to display.
    pub status: Option<String>,
    /// Timer panel highlight deadline.
    pub flash_until: Option<Instant>,
    pending_bell: bool,
    test_username: String,
    chat_config: Option<ChatClientConfig>,
    events_tx: Sender<ChatEvent>,
    events_rx: Receiver<ChatEvent>,
    runtime: Option<Runtime>,
    worker: Option<JoinHandle<()>>,
}

impl App {
    /// Create the overlay state. The live connection is not opened yet.
    #[must_use]
    pub fn new(settings: OverlaySettings, tasks: TaskList) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        let test_mode = settings.test_mode || settings.chat.is_none();

        let mut app = Self {
            timer: SessionTimer::new(settings.work_seconds, settings.break_seconds),
            ticker: Ticker::new(),
            tasks,
            chat: ChatFeed::new(settings.history),
            connection: if test_mode {
                ConnectionStatus::TestMode
            } else {
                ConnectionStatus::Connecting
            },
            test_mode,
            selected: 0,
            input: None,
            status: Some("Press ? for help".to_string()),
            flash_until: None,
            pending_bell: false,
            test_username: settings.test_username,
            chat_config: settings.chat,
            events_tx,
            events_rx,
            runtime: None,
            worker: None,
        };

        if test_mode {
            app.post_intro();
        }
        app
    }

    /// Open the live connection unless running in test mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the network runtime cannot be started.
    pub fn connect(&mut self) -> Result<(), OverlayError> {
        if self.test_mode {
            return Ok(());
        }
        self.start_live()
    }

    fn start_live(&mut self) -> Result<(), OverlayError> {
        let Some(config) = self.chat_config.clone() else {
            self.connection = ConnectionStatus::NotConfigured;
            return Ok(());
        };

        if self.runtime.is_none() {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("chat-worker")
                .enable_all()
                .build()?;
            self.runtime = Some(runtime);
        }

        if let Some(runtime) = self.runtime.as_ref() {
            info!(channel = %config.channel, "opening live chat");
            self.connection = ConnectionStatus::Connecting;
            self.worker = Some(spawn_chat_worker(
                runtime.handle(),
                config,
                self.events_tx.clone(),
            ));
        }
        Ok(())
    }

    fn stop_live(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
            info!("live chat closed");
        }
    }

    /// Switch between live chat and manual test input.
    ///
    /// A live connection that cannot be started is shown as a connection
    /// error; the overlay keeps running.
    pub fn toggle_mode(&mut self) {
        self.test_mode = !self.test_mode;
        if self.test_mode {
            self.stop_live();
            self.connection = ConnectionStatus::TestMode;
            self.status = Some("TEST mode: press i to type a message".to_string());
        } else {
            self.input = None;
            match self.start_live() {
                Ok(()) => self.status = Some("LIVE mode".to_string()),
                Err(err) => self.report_live_failure(&err),
            }
        }
    }

    fn report_live_failure(&mut self, err: &OverlayError) {
        warn!(error = %err, "could not start live chat");
        self.connection = ConnectionStatus::Error(err.to_string());
        self.status = Some("LIVE mode unavailable, press t for TEST mode".to_string());
    }

    fn post_intro(&mut self) {
        let prefix = self.tasks.prefix().to_string();
        for hint in [
            "Test mode active! Press i to type messages.".to_string(),
            format!("Add a task: {prefix} do homework"),
            format!("Toggle a task: {prefix} done 1"),
            format!("Delete a task: {prefix} delete 1"),
            format!("Delete all tasks: {prefix} clear"),
        ] {
            self.post_message(SYSTEM_USER, &hint);
        }
    }

    /// Post a chat message, forwarding commands to the task list.
    pub fn post_message(&mut self, username: &str, text: &str) {
        self.chat.post(username, text, &mut self.tasks);
        self.clamp_selection();
    }

    /// Apply everything the chat worker has sent so far, in arrival order.
    pub fn drain_chat_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_chat_event(event);
        }
    }

    /// Apply a single chat worker event. Ignored while in test mode.
    pub fn handle_chat_event(&mut self, event: ChatEvent) {
        if self.test_mode {
            return;
        }
        match event {
            ChatEvent::Message { username, text } => self.post_message(&username, &text),
            ChatEvent::Status(status) => self.connection = status,
        }
    }

    /// Start the timer.
    pub fn start_timer(&mut self, now: Instant) {
        if !self.timer.is_running() {
            let phase = self.timer.phase();
            self.status = Some(format!(
                "{} started ({})",
                phase.display_name(),
                describe_seconds(self.timer.duration_of(phase))
            ));
        }
        self.timer.start();
        self.ticker.arm(now);
    }

    /// Pause the timer.
    pub fn pause_timer(&mut self) {
        self.timer.pause();
        self.ticker.disarm();
    }

    /// Reset the timer to the start of a work phase.
    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.ticker.disarm();
    }

    /// Apply every timer tick due at `now`.
    pub fn on_tick(&mut self, now: Instant) {
        for _ in 0..self.ticker.due(now) {
            if let Some(change) = self.timer.tick() {
                self.ticker.disarm();
                self.notify_phase(change, now);
                break;
            }
        }
    }

    fn notify_phase(&mut self, change: PhaseChange, now: Instant) {
        info!(phase = %change.phase, "timer phase changed");
        self.status = Some(change.message().to_string());
        self.flash_until = Some(now + FLASH_DURATION);
        self.pending_bell = true;
    }

    /// Whether the timer panel should be highlighted at `now`.
    #[must_use]
    pub fn is_flashing(&self, now: Instant) -> bool {
        self.flash_until.is_some_and(|until| now < until)
    }

    /// Take the pending bell request, if any.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.pending_bell)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    /// Toggle the selected task.
    pub fn toggle_selected(&mut self) {
        if self.tasks.toggle_done(self.selected) {
            if let Some(task) = self.tasks.tasks().get(self.selected) {
                let verb = if task.done { "Done" } else { "Reopened" };
                self.status = Some(format!("{verb}: {}", task.text));
            }
        }
    }

    /// Delete the selected task.
    pub fn delete_selected(&mut self) {
        let text = self.tasks.tasks().get(self.selected).map(|t| t.text.clone());
        if self.tasks.remove(self.selected) {
            if let Some(text) = text {
                self.status = Some(format!("Deleted: {text}"));
            }
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        if self.tasks.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len() - 1;
        }
    }

    /// Open the message input line (test mode only).
    pub fn begin_input(&mut self) {
        if self.test_mode {
            self.input = Some(String::new());
            self.status = Some(format!("Typing as {} | Enter:send | Esc:close", self.test_username));
        } else {
            self.status = Some("Switch to TEST mode (t) to type messages".to_string());
        }
    }

    /// Append a character to the input line.
    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.push(c);
        }
    }

    /// Remove the last character from the input line.
    pub fn input_backspace(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.pop();
        }
    }

    /// Post the input line as a chat message and clear it.
    pub fn submit_input(&mut self) {
        let Some(text) = self.input.as_mut().map(std::mem::take) else {
            return;
        };
        let text = text.trim();
        if !text.is_empty() {
            let username = self.test_username.clone();
            self.post_message(&username, text);
        }
    }

    /// Close the input line.
    pub fn cancel_input(&mut self) {
        self.input = None;
        self.status = None;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop_live();
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
