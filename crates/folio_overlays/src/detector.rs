//! Fixed key-sequence detection with a timed activation.

use super::flag::TimedFlag;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// The classic cheat code, as normalized key names.
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// How long a match keeps the detector active.
pub const DEFAULT_DWELL: Duration = Duration::from_secs(10);

/// Transitions reported by a [`SequenceDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectorEvent {
    /// Idle → Active after the target sequence was typed.
    Activated,
    /// Active → Idle after the dwell ran out or a manual cancel.
    Deactivated,
}

/// Watches a token stream for one exact sequence.
///
/// Keeps a sliding window of the last `N` tokens, `N` being the target
/// length, and compares it position by position after every token. The
/// detector knows nothing about what activation means to its owner.
#[derive(Debug, Clone)]
pub struct SequenceDetector<T> {
    target: Vec<T>,
    window: VecDeque<T>,
    active: TimedFlag,
}

impl<T: PartialEq + Clone + Debug> SequenceDetector<T> {
    /// Detector for `target`, staying active for `dwell` after each match.
    ///
    /// An empty target never matches.
    pub fn new(target: Vec<T>, dwell: Duration) -> Self {
        Self {
            window: VecDeque::with_capacity(target.len()),
            target,
            active: TimedFlag::new(dwell),
        }
    }

    /// The sequence being watched for.
    pub fn target(&self) -> &[T] {
        &self.target
    }

    /// The trailing window, oldest token first.
    pub fn window(&self) -> impl Iterator<Item = &T> {
        self.window.iter()
    }

    /// True between a match and the end of its dwell.
    pub fn is_active(&self) -> bool {
        self.active.is_active()
    }

    /// When the current activation ends.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.deadline()
    }

    /// Feeds one token.
    ///
    /// Returns [`DetectorEvent::Activated`] on an Idle → Active match. A match
    /// while already active only restarts the dwell and returns `None`.
    #[instrument(skip(self), fields(active = self.is_active()))]
    pub fn observe(&mut self, token: T, now: Instant) -> Option<DetectorEvent> {
        if self.target.is_empty() {
            return None;
        }

        if self.window.len() == self.target.len() {
            self.window.pop_front();
        }
        self.window.push_back(token);

        if !self.window.iter().eq(self.target.iter()) {
            return None;
        }

        if self.active.activate(now) {
            info!("Sequence matched, detector active");
            Some(DetectorEvent::Activated)
        } else {
            debug!("Sequence matched again, dwell restarted");
            None
        }
    }

    /// Ends the activation once its dwell has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<DetectorEvent> {
        if self.active.poll(now) {
            info!("Detector dwell elapsed");
            Some(DetectorEvent::Deactivated)
        } else {
            None
        }
    }

    /// Ends the activation immediately.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> Option<DetectorEvent> {
        self.active.cancel().then_some(DetectorEvent::Deactivated)
    }
}

impl SequenceDetector<String> {
    /// Detector for [`KONAMI_CODE`] with the default ten second dwell.
    pub fn konami() -> Self {
        Self::new(
            KONAMI_CODE.iter().map(|k| (*k).to_string()).collect(),
            DEFAULT_DWELL,
        )
    }
}
