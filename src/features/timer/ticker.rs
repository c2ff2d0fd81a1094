//! Wall-clock to one-second tick conversion.
//!
//! The UI loop wakes every ~100 ms; the ticker reports how many whole seconds
//! have passed since it was armed so the timer advances in fixed steps
//! regardless of how often the loop runs.

use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

/// Recurring one-second schedule.
#[derive(Debug, Default, Clone)]
pub struct Ticker {
    next: Option<Instant>,
}

impl Ticker {
    /// Create a disarmed ticker.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: None }
    }

    /// Start ticking; the first tick is due one second after `now`.
    ///
    /// Re-arming an armed ticker keeps the existing schedule.
    pub fn arm(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + TICK);
        }
    }

    /// Stop ticking.
    pub fn disarm(&mut self) {
        self.next = None;
    }

    /// Whether the ticker is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Number of ticks due at `now`, advancing the schedule past them.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };

        let mut count = 0;
        while next <= now {
            count += 1;
            next += TICK;
        }
        self.next = Some(next);
        count
    }
}
