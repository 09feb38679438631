//! Which overlays are open, and the side effects tied to their lifetime.

use super::audio::{AudioSink, AudioState};
use super::catalog::{OverlayCatalog, OverlayKind};
use super::detector::DetectorEvent;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// What happens when an overlay opens while another is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPolicy {
    /// At most one overlay open at a time.
    #[default]
    Exclusive,
    /// Overlays stack; the newest one is visible.
    Permissive,
}

/// An open overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveOverlay {
    kind: OverlayKind,
    message: Option<String>,
    audio: Option<AudioState>,
}

impl ActiveOverlay {
    /// Which overlay this is.
    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    /// The flavor text drawn when it opened.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Playback state, if the overlay has a track.
    pub fn audio(&self) -> Option<&AudioState> {
        self.audio.as_ref()
    }
}

/// Maps open/close requests and detector signals onto visible overlays.
///
/// Owns the audio sink: a track starts when its overlay opens and stops when
/// it closes, never twice for the same activation.
#[derive(Debug)]
pub struct OverlayCoordinator<A> {
    catalog: OverlayCatalog,
    policy: OverlayPolicy,
    trigger: OverlayKind,
    open: Vec<ActiveOverlay>,
    audio: A,
    rng: StdRng,
}

impl<A: AudioSink> OverlayCoordinator<A> {
    /// A coordinator with nothing open. Detector activations open
    /// [`OverlayKind::CheatCode`].
    #[instrument(skip(catalog, audio))]
    pub fn new(catalog: OverlayCatalog, policy: OverlayPolicy, audio: A) -> Self {
        Self {
            catalog,
            policy,
            trigger: OverlayKind::CheatCode,
            open: Vec::new(),
            audio,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Uses a seeded generator for message draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Binds detector activations to `kind`.
    pub fn with_trigger(mut self, kind: OverlayKind) -> Self {
        self.trigger = kind;
        self
    }

    /// The overlay opened by detector activations.
    pub fn trigger(&self) -> OverlayKind {
        self.trigger
    }

    /// The stacking policy.
    pub fn policy(&self) -> OverlayPolicy {
        self.policy
    }

    /// The audio sink.
    pub fn audio_sink(&self) -> &A {
        &self.audio
    }

    /// All open overlays, oldest first.
    pub fn open_overlays(&self) -> &[ActiveOverlay] {
        &self.open
    }

    /// The overlay on top.
    pub fn visible(&self) -> Option<&ActiveOverlay> {
        self.open.last()
    }

    /// True if `kind` is open.
    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.find(kind).is_some()
    }

    /// Opens `kind`. Returns `false` if it was already open, in which case
    /// nothing changes and no second track starts.
    #[instrument(skip(self), fields(policy = %self.policy))]
    pub fn open(&mut self, kind: OverlayKind) -> bool {
        if self.is_open(kind) {
            debug!("Overlay already open");
            return false;
        }

        if self.policy == OverlayPolicy::Exclusive {
            self.close_all();
        }

        let spec = self.catalog.get(kind);
        let message = spec.and_then(|s| s.pick_message(&mut self.rng));
        let audio = spec.and_then(|s| s.audio.as_ref()).map(|cue| {
            self.audio.start(kind, cue);
            AudioState::playing(cue)
        });

        info!(%kind, ?message, has_audio = audio.is_some(), "Overlay opened");
        self.open.push(ActiveOverlay {
            kind,
            message,
            audio,
        });
        true
    }

    /// Closes `kind`, stopping its track. Returns `false` if it was not open.
    #[instrument(skip(self))]
    pub fn close(&mut self, kind: OverlayKind) -> bool {
        let Some(index) = self.find(kind) else {
            debug!("Overlay not open");
            return false;
        };

        let overlay = self.open.remove(index);
        if overlay.audio.is_some() {
            self.audio.stop(kind);
        }
        info!(%kind, "Overlay closed");
        true
    }

    /// Closes everything, newest first.
    pub fn close_all(&mut self) {
        while let Some(overlay) = self.open.last() {
            let kind = overlay.kind;
            self.close(kind);
        }
    }

    /// Opens or closes the trigger overlay in step with the detector.
    #[instrument(skip(self), fields(trigger = %self.trigger))]
    pub fn handle_detector(&mut self, event: DetectorEvent) -> bool {
        match event {
            DetectorEvent::Activated => self.open(self.trigger),
            DetectorEvent::Deactivated => self.close(self.trigger),
        }
    }

    /// Pauses or resumes `kind`'s track. Returns the new paused state, or
    /// `None` if the overlay is not open or has no track.
    #[instrument(skip(self))]
    pub fn toggle_playback(&mut self, kind: OverlayKind) -> Option<bool> {
        let state = self.audio_state_mut(kind)?;
        state.paused = !state.paused;
        let paused = state.paused;
        if paused {
            self.audio.pause(kind);
        } else {
            self.audio.resume(kind);
        }
        Some(paused)
    }

    /// Mutes or unmutes `kind`'s track. Returns the new muted state.
    #[instrument(skip(self))]
    pub fn toggle_mute(&mut self, kind: OverlayKind) -> Option<bool> {
        let state = self.audio_state_mut(kind)?;
        state.muted = !state.muted;
        let muted = state.muted;
        self.audio.set_muted(kind, muted);
        Some(muted)
    }

    /// Sets `kind`'s volume. Zero mutes, anything louder unmutes.
    ///
    /// Values are clamped to 0.0..=1.0; non-finite values are rejected.
    #[instrument(skip(self))]
    pub fn set_volume(&mut self, kind: OverlayKind, volume: f32) -> bool {
        if !volume.is_finite() {
            warn!(volume, "Rejected non-finite volume");
            return false;
        }
        let volume = volume.clamp(0.0, 1.0);
        let Some(state) = self.audio_state_mut(kind) else {
            return false;
        };

        state.volume = volume;
        let muted = volume == 0.0;
        let mute_changed = state.muted != muted;
        state.muted = muted;

        self.audio.set_volume(kind, volume);
        if mute_changed {
            self.audio.set_muted(kind, muted);
        }
        true
    }

    fn find(&self, kind: OverlayKind) -> Option<usize> {
        self.open.iter().position(|o| o.kind == kind)
    }

    fn audio_state_mut(&mut self, kind: OverlayKind) -> Option<&mut AudioState> {
        let index = self.find(kind)?;
        self.open[index].audio.as_mut()
    }
}
