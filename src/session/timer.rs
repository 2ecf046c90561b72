//! Session countdown.

use serde::{Deserialize, Serialize};

/// Result of one countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running with this many seconds left.
    Running(u32),
    /// Reached zero on this tick. Reported exactly once.
    Expired,
    /// Not running; the tick was ignored.
    Idle,
}

/// A fixed-duration countdown in whole seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    initial: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// A stopped countdown at `seconds`.
    #[must_use]
    pub fn new(seconds: u32) -> Self {
        Self {
            initial: seconds,
            remaining: seconds,
            running: false,
        }
    }

    /// Reset to the initial duration and run.
    pub fn restart(&mut self) {
        self.remaining = self.initial;
        self.running = self.initial > 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Decrement by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining)
        }
    }
}

/// `m:ss` for a number of seconds, e.g. `3:00` or `0:07`.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
