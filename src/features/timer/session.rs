//! Work/break session timer.
//!
//! A two-phase countdown. Ticking only happens while running; when the
//! countdown reaches zero the timer flips phase and pauses, so every phase
//! boundary needs an explicit `start()`.

use serde::{Deserialize, Serialize};

use super::format::format_seconds_mmss;

/// One of the two alternating intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Focused work interval.
    Work,
    /// Rest interval.
    Break,
}

impl Phase {
    /// The other phase.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Break => "Break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Run state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Freshly created or reset.
    Idle,
    /// Counting down.
    Running,
    /// Halted by the user or by a phase switch.
    Paused,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// Notification emitted when the timer crosses a phase boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    /// Phase the timer switched into.
    pub phase: Phase,
}

impl PhaseChange {
    /// User-facing announcement for this change.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self.phase {
            Phase::Break => "Work session finished! Break time.",
            Phase::Work => "Break over! Press 1 to start the next work session.",
        }
    }
}

/// Alternating work/break countdown.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    work_seconds: u32,
    break_seconds: u32,
    remaining: u32,
    phase: Phase,
    state: TimerState,
}

impl SessionTimer {
    /// Create a timer with the given phase durations in seconds.
    ///
    /// Durations of zero are raised to one second.
    #[must_use]
    pub fn new(work_seconds: u32, break_seconds: u32) -> Self {
        let work_seconds = work_seconds.max(1);
        Self {
            work_seconds,
            break_seconds: break_seconds.max(1),
            remaining: work_seconds,
            phase: Phase::Work,
            state: TimerState::Idle,
        }
    }

    /// Start counting down. Does nothing if already running.
    pub fn start(&mut self) {
        if self.state != TimerState::Running {
            self.state = TimerState::Running;
        }
    }

    /// Halt counting. Safe to call when not running.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Stop and return to the start of a work phase.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.phase = Phase::Work;
        self.remaining = self.work_seconds;
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the phase change if this tick finished the current phase.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if self.state != TimerState::Running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            Some(self.switch_phase())
        } else {
            None
        }
    }

    /// Flip to the other phase and pause.
    pub fn switch_phase(&mut self) -> PhaseChange {
        self.phase = self.phase.toggled();
        self.remaining = self.duration_of(self.phase);
        self.state = TimerState::Paused;
        PhaseChange { phase: self.phase }
    }

    /// Configured duration of a phase in seconds.
    #[must_use]
    pub const fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::Break => self.break_seconds,
        }
    }

    /// Seconds left in the current phase.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current run state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Check if the timer is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Get progress through the current phase (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.duration_of(self.phase));
        1.0 - (f64::from(self.remaining) / total)
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_seconds_mmss(self.remaining)
    }
}
