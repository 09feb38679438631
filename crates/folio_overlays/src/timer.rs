//! Single-slot timers driven by an explicit clock.

use std::time::Instant;

/// At most one pending deadline with a payload.
///
/// Scheduling while something is pending replaces it, so a slot never holds
/// two timers. Nothing fires on its own; the owner calls [`TimerSlot::fire`]
/// with the current time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSlot<E> {
    pending: Option<(Instant, E)>,
}

impl<E> TimerSlot<E> {
    /// An empty slot.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedules `event` for `due`, returning whatever it superseded.
    pub fn schedule(&mut self, due: Instant, event: E) -> Option<E> {
        self.pending.replace((due, event)).map(|(_, e)| e)
    }

    /// Drops the pending timer, if any.
    pub fn cancel(&mut self) -> Option<E> {
        self.pending.take().map(|(_, e)| e)
    }

    /// The pending deadline.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    /// True while a timer is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the payload if its deadline is at or before `now`.
    pub fn fire(&mut self, now: Instant) -> Option<E> {
        if self.deadline().is_some_and(|due| due <= now) {
            self.cancel()
        } else {
            None
        }
    }
}

impl<E> Default for TimerSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}
