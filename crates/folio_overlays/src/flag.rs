//! Boolean-with-timeout.

use super::timer::TimerSlot;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// A flag that switches itself off `dwell` after the last activation.
///
/// The flag is active exactly while its deactivation timer is pending.
/// Re-activating an active flag restarts the dwell instead of stacking a
/// second timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedFlag {
    dwell: Duration,
    expiry: TimerSlot<()>,
}

impl TimedFlag {
    /// An inactive flag with the given dwell.
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            expiry: TimerSlot::new(),
        }
    }

    /// How long an activation lasts.
    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    /// True until the dwell runs out (as observed by [`TimedFlag::poll`]).
    pub fn is_active(&self) -> bool {
        self.expiry.is_pending()
    }

    /// When the flag will switch off.
    pub fn deadline(&self) -> Option<Instant> {
        self.expiry.deadline()
    }

    /// Switches the flag on until `now + dwell`.
    ///
    /// Returns `true` if the flag was off before this call.
    #[instrument(skip(self), fields(dwell = ?self.dwell))]
    pub fn activate(&mut self, now: Instant) -> bool {
        let was_active = self.expiry.schedule(now + self.dwell, ()).is_some();
        if was_active {
            debug!("Dwell restarted");
        }
        !was_active
    }

    /// Switches the flag off if its dwell has elapsed.
    ///
    /// Returns `true` on the call that observes the expiry.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.expiry.fire(now).is_some()
    }

    /// Switches the flag off immediately. Returns `true` if it was on.
    pub fn cancel(&mut self) -> bool {
        self.expiry.cancel().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_expires_after_dwell() {
        let now = Instant::now();
        let mut flag = TimedFlag::new(Duration::from_secs(3));

        assert!(flag.activate(now));
        assert!(flag.is_active());
        assert!(!flag.poll(now + Duration::from_millis(2999)));
        assert!(flag.poll(now + Duration::from_secs(3)));
        assert!(!flag.is_active());
    }

    #[test]
    fn test_reactivation_restarts_dwell() {
        let now = Instant::now();
        let mut flag = TimedFlag::new(Duration::from_secs(3));

        assert!(flag.activate(now));
        assert!(!flag.activate(now + Duration::from_secs(2)));
        assert!(!flag.poll(now + Duration::from_secs(3)));
        assert_eq!(flag.deadline(), Some(now + Duration::from_secs(5)));
        assert!(flag.poll(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_cancel_switches_off() {
        let now = Instant::now();
        let mut flag = TimedFlag::new(Duration::from_secs(3));
        assert!(!flag.cancel());
        flag.activate(now);
        assert!(flag.cancel());
        assert!(!flag.is_active());
    }
}
