//! Audio sink for a terminal with no speakers: logs and remembers.

use folio_overlays::{AudioCue, AudioSink, OverlayKind};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Stand-in audio backend.
///
/// Every command goes to the log; the tracks that would be playing are kept
/// so the UI can show a "now playing" line.
#[derive(Debug, Default)]
pub struct LoggingAudio {
    playing: BTreeMap<OverlayKind, String>,
}

impl LoggingAudio {
    /// An idle sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track loaded for `overlay`, if any.
    pub fn track(&self, overlay: OverlayKind) -> Option<&str> {
        self.playing.get(&overlay).map(String::as_str)
    }

    /// Number of loaded tracks.
    pub fn loaded(&self) -> usize {
        self.playing.len()
    }
}

impl AudioSink for LoggingAudio {
    fn start(&mut self, overlay: OverlayKind, cue: &AudioCue) {
        info!(%overlay, track = %cue.track, volume = cue.volume, "▶ Audio start");
        self.playing.insert(overlay, cue.track.clone());
    }

    fn stop(&mut self, overlay: OverlayKind) {
        info!(%overlay, "■ Audio stop");
        self.playing.remove(&overlay);
    }

    fn pause(&mut self, overlay: OverlayKind) {
        debug!(%overlay, "Audio pause");
    }

    fn resume(&mut self, overlay: OverlayKind) {
        debug!(%overlay, "Audio resume");
    }

    fn set_volume(&mut self, overlay: OverlayKind, volume: f32) {
        debug!(%overlay, volume, "Audio volume");
    }

    fn set_muted(&mut self, overlay: OverlayKind, muted: bool) {
        debug!(%overlay, muted, "Audio mute");
    }
}
