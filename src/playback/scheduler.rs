//! Single-slot tick scheduler.
//!
//! Playback needs at most one pending advance. The scheduler owns that one
//! slot:
//! - Scheduling replaces whatever was pending (no duplicate callbacks)
//! - Cancelling drops the pending tick without touching playback progress
//! - A tick fires at most once, on the first poll at or after its deadline
//!
//! Time is a monotonic offset supplied by the caller, so hosts can drive the
//! scheduler from a wall clock and tests from virtual time.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The one pending tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTick {
    /// When the tick becomes due.
    pub due: Duration,
    /// Generation number, unique per scheduling call.
    pub generation: u64,
}

/// Owner of the single pending tick.
#[derive(Debug, Default, Clone)]
pub struct TickScheduler {
    pending: Option<PendingTick>,
    /// Monotonic counter; bumps on every schedule.
    generation: u64,
}

impl TickScheduler {
    /// Create an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick `interval` after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Duration, interval: Duration) -> PendingTick {
        self.generation += 1;
        let tick = PendingTick {
            due: now.saturating_add(interval),
            generation: self.generation,
        };
        self.pending = Some(tick);
        tick
    }

    /// Drop the pending tick, if any.
    pub fn cancel(&mut self) -> Option<PendingTick> {
        self.pending.take()
    }

    /// Take the pending tick if it is due at `now`.
    #[must_use]
    pub fn poll(&mut self, now: Duration) -> Option<PendingTick> {
        match self.pending {
            Some(tick) if tick.due <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Pending tick, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    /// Whether a tick is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending tick is due (zero if overdue).
    #[must_use]
    pub fn time_until_due(&self, now: Duration) -> Option<Duration> {
        self.pending.map(|tick| tick.due.saturating_sub(now))
    }
}
