//! Audio side effects, keyed by overlay.

use super::catalog::{AudioCue, OverlayKind};
use serde::{Deserialize, Serialize};

/// Receives playback commands from the coordinator.
///
/// The coordinator issues at most one `start` per overlay activation and
/// always a `stop` when the overlay closes, so implementations do not need to
/// guard against duplicate streams themselves.
pub trait AudioSink {
    /// Begins looping `cue` for `overlay`.
    fn start(&mut self, overlay: OverlayKind, cue: &AudioCue);

    /// Stops and rewinds the track for `overlay`.
    fn stop(&mut self, overlay: OverlayKind);

    /// Pauses without rewinding.
    fn pause(&mut self, overlay: OverlayKind);

    /// Continues a paused track.
    fn resume(&mut self, overlay: OverlayKind);

    /// Changes the volume, 0.0 to 1.0.
    fn set_volume(&mut self, overlay: OverlayKind, volume: f32);

    /// Mutes or unmutes without touching the volume.
    fn set_muted(&mut self, overlay: OverlayKind, muted: bool);
}

/// Playback state of an open overlay's track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioState {
    /// Current volume, 0.0 to 1.0.
    pub volume: f32,
    /// Muted by the user or by a zero volume.
    pub muted: bool,
    /// Paused by the user.
    pub paused: bool,
}

impl AudioState {
    /// Fresh state for a just-started cue.
    pub fn playing(cue: &AudioCue) -> Self {
        Self {
            volume: cue.volume.clamp(0.0, 1.0),
            muted: false,
            paused: false,
        }
    }

    /// True while sound is actually coming out.
    pub fn is_audible(&self) -> bool {
        !self.paused && !self.muted && self.volume > 0.0
    }
}
