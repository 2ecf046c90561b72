//! Delayed transitions and countdown ticks on a virtual timeline.
//!
//! The engine never sleeps. When a round resolves it emits a
//! `ScheduledTransition` stamped with the round's generation; the host
//! delivers it back after `delay_ms`. A transition whose generation no
//! longer matches the current round is stale and ignored, so a skip or
//! restart can never be clobbered by a timer from an earlier round.
//!
//! `Scheduler` is a ready-made host timeline: it orders pending transitions
//! and 1-second countdown ticks by due time.

use serde::{Deserialize, Serialize};

/// Interval between countdown ticks.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// What happens when a scheduled transition fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Next question after a correct answer.
    Advance,
    /// Next question after the answer was revealed.
    AfterReveal,
}

/// A one-shot delayed transition bound to one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTransition {
    /// Generation of the round that scheduled it.
    pub generation: u64,
    pub kind: TransitionKind,
    pub delay_ms: u64,
}

/// Something due on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Due {
    Tick,
    Transition(ScheduledTransition),
}

/// Virtual clock holding pending transitions and the countdown interval.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    /// (due time, insertion sequence, transition)
    pending: Vec<(u64, u64, ScheduledTransition)>,
    sequence: u64,
    next_tick_ms: Option<u64>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue a transition `delay_ms` from now. Due times saturate at
    /// `u64::MAX`.
    pub fn schedule(&mut self, transition: ScheduledTransition) {
        let due = self.now_ms.saturating_add(transition.delay_ms);
        self.pending.push((due, self.sequence, transition));
        self.sequence += 1;
    }

    /// Number of transitions not yet delivered.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Start ticking once per second, first tick one interval from now.
    pub fn start_ticks(&mut self) {
        self.next_tick_ms = self.now_ms.checked_add(TICK_INTERVAL_MS);
    }

    /// Stop the countdown interval.
    pub fn stop_ticks(&mut self) {
        self.next_tick_ms = None;
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.next_tick_ms.is_some()
    }

    /// Drop every pending transition.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Pop the earliest item due at or before `until`, moving the clock to
    /// its due time. `None` once nothing more is due.
    ///
    /// Ties go to the tick first, then to transitions in scheduling order.
    pub fn next_due(&mut self, until: u64) -> Option<Due> {
        let transition = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (due, _, _))| *due <= until)
            .min_by_key(|(_, (due, seq, _))| (*due, *seq))
            .map(|(i, (due, _, _))| (i, *due));

        match (self.next_tick_ms.filter(|t| *t <= until), transition) {
            (Some(tick), Some((_, due))) if tick <= due => self.fire_tick(tick),
            (Some(tick), None) => self.fire_tick(tick),
            (_, Some((i, due))) => {
                let (_, _, t) = self.pending.remove(i);
                self.now_ms = self.now_ms.max(due);
                Some(Due::Transition(t))
            }
            (None, None) => None,
        }
    }

    fn fire_tick(&mut self, at: u64) -> Option<Due> {
        self.now_ms = self.now_ms.max(at);
        // The clock cannot run past u64::MAX, so ticking ends there.
        self.next_tick_ms = at.checked_add(TICK_INTERVAL_MS);
        Some(Due::Tick)
    }

    /// Move the clock forward without delivering anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}
