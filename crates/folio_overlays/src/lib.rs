//! Seasonal overlays and the hidden cheat code for the portfolio shell.
//!
//! Everything here is driven by an explicit clock: callers pass `now` into
//! every operation and ask for the next deadline, so tests can run on a
//! simulated timeline and the shell can sleep exactly until something is due.
//!
//! # Example
//!
//! ```
//! use folio_overlays::{DetectorEvent, KONAMI_CODE, SequenceDetector};
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut detector = SequenceDetector::konami();
//! let mut last = None;
//! for key in KONAMI_CODE {
//!     last = detector.observe(key.to_string(), start);
//! }
//! assert_eq!(last, Some(DetectorEvent::Activated));
//! assert_eq!(
//!     detector.poll(start + Duration::from_secs(10)),
//!     Some(DetectorEvent::Deactivated)
//! );
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod audio;
mod catalog;
mod coordinator;
mod detector;
mod flag;
mod timer;

pub use audio::{AudioSink, AudioState};
pub use catalog::{AudioCue, OverlayCatalog, OverlayKind, OverlaySpec};
pub use coordinator::{ActiveOverlay, OverlayCoordinator, OverlayPolicy};
pub use detector::{DEFAULT_DWELL, DetectorEvent, KONAMI_CODE, SequenceDetector};
pub use flag::TimedFlag;
pub use timer::TimerSlot;
