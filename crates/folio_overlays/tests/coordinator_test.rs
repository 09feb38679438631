//! Overlay lifecycle and its audio side effects.

use folio_overlays::{
    AudioCue, AudioSink, DetectorEvent, OverlayCatalog, OverlayCoordinator, OverlayKind,
    OverlayPolicy, OverlaySpec,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Start(OverlayKind, String),
    Stop(OverlayKind),
    Pause(OverlayKind),
    Resume(OverlayKind),
    Volume(OverlayKind, f32),
    Muted(OverlayKind, bool),
}

#[derive(Debug, Default)]
struct RecordingAudio {
    calls: Vec<Call>,
}

impl RecordingAudio {
    fn starts(&self, kind: OverlayKind) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Start(k, _) if *k == kind))
            .count()
    }

    fn stops(&self, kind: OverlayKind) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == Call::Stop(kind))
            .count()
    }
}

impl AudioSink for RecordingAudio {
    fn start(&mut self, overlay: OverlayKind, cue: &AudioCue) {
        self.calls.push(Call::Start(overlay, cue.track.clone()));
    }

    fn stop(&mut self, overlay: OverlayKind) {
        self.calls.push(Call::Stop(overlay));
    }

    fn pause(&mut self, overlay: OverlayKind) {
        self.calls.push(Call::Pause(overlay));
    }

    fn resume(&mut self, overlay: OverlayKind) {
        self.calls.push(Call::Resume(overlay));
    }

    fn set_volume(&mut self, overlay: OverlayKind, volume: f32) {
        self.calls.push(Call::Volume(overlay, volume));
    }

    fn set_muted(&mut self, overlay: OverlayKind, muted: bool) {
        self.calls.push(Call::Muted(overlay, muted));
    }
}

fn coordinator(policy: OverlayPolicy) -> OverlayCoordinator<RecordingAudio> {
    OverlayCoordinator::new(OverlayCatalog::builtin(), policy, RecordingAudio::default())
        .with_seed(42)
}

#[test]
fn test_open_twice_starts_audio_once() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);

    assert!(overlays.open(OverlayKind::TicTacToe));
    assert!(!overlays.open(OverlayKind::TicTacToe));

    assert_eq!(overlays.audio_sink().starts(OverlayKind::TicTacToe), 1);
    assert_eq!(
        overlays.audio_sink().calls[0],
        Call::Start(OverlayKind::TicTacToe, "halloween_bg_music".to_string())
    );
    assert_eq!(overlays.open_overlays().len(), 1);
}

#[test]
fn test_close_stops_audio() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);
    overlays.open(OverlayKind::CheatCode);

    assert!(overlays.close(OverlayKind::CheatCode));
    assert!(!overlays.close(OverlayKind::CheatCode));
    assert_eq!(overlays.audio_sink().stops(OverlayKind::CheatCode), 1);
    assert!(overlays.visible().is_none());
}

#[test]
fn test_reopen_starts_fresh_track() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);
    overlays.open(OverlayKind::CheatCode);
    overlays.close(OverlayKind::CheatCode);
    overlays.open(OverlayKind::CheatCode);

    let audio = overlays.audio_sink();
    assert_eq!(audio.starts(OverlayKind::CheatCode), 2);
    assert_eq!(audio.stops(OverlayKind::CheatCode), 1);
}

#[test]
fn test_exclusive_closes_previous_overlay() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);
    overlays.open(OverlayKind::TicTacToe);
    overlays.open(OverlayKind::Halloween);

    assert!(!overlays.is_open(OverlayKind::TicTacToe));
    assert_eq!(
        overlays.visible().map(|o| o.kind()),
        Some(OverlayKind::Halloween)
    );
    assert_eq!(overlays.audio_sink().stops(OverlayKind::TicTacToe), 1);
}

#[test]
fn test_permissive_stacks_overlays() {
    let mut overlays = coordinator(OverlayPolicy::Permissive);
    overlays.open(OverlayKind::TicTacToe);
    overlays.open(OverlayKind::CheatCode);

    assert!(overlays.is_open(OverlayKind::TicTacToe));
    assert_eq!(
        overlays.visible().map(|o| o.kind()),
        Some(OverlayKind::CheatCode)
    );

    overlays.close_all();
    assert!(overlays.open_overlays().is_empty());
    assert_eq!(overlays.audio_sink().stops(OverlayKind::TicTacToe), 1);
    assert_eq!(overlays.audio_sink().stops(OverlayKind::CheatCode), 1);
}

#[test]
fn test_message_fixed_for_activation() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);
    overlays.open(OverlayKind::Christmas);

    let first = overlays.visible().and_then(|o| o.message()).map(str::to_string);
    assert!(first.is_some());

    // Re-opening an open overlay must not redraw its message.
    overlays.open(OverlayKind::Christmas);
    let second = overlays.visible().and_then(|o| o.message()).map(str::to_string);
    assert_eq!(first, second);

    let pool = &OverlayCatalog::builtin()
        .get(OverlayKind::Christmas)
        .map(|s| s.messages.clone())
        .unwrap_or_default();
    assert!(first.is_some_and(|m| pool.contains(&m)));
}

#[test]
fn test_overlay_without_entry_opens_bare() {
    let mut overlays = OverlayCoordinator::new(
        OverlayCatalog::empty(),
        OverlayPolicy::Exclusive,
        RecordingAudio::default(),
    );
    assert!(overlays.open(OverlayKind::Diwali));

    let visible = overlays.visible();
    assert_eq!(visible.and_then(|o| o.message()), None);
    assert!(visible.and_then(|o| o.audio()).is_none());
    assert!(overlays.audio_sink().calls.is_empty());
}

#[test]
fn test_detector_events_drive_trigger_overlay() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);

    assert!(overlays.handle_detector(DetectorEvent::Activated));
    assert!(overlays.is_open(OverlayKind::CheatCode));
    assert!(overlays.handle_detector(DetectorEvent::Deactivated));
    assert!(!overlays.is_open(OverlayKind::CheatCode));
    assert_eq!(overlays.audio_sink().starts(OverlayKind::CheatCode), 1);
    assert_eq!(overlays.audio_sink().stops(OverlayKind::CheatCode), 1);
}

#[test]
fn test_custom_trigger() {
    let catalog = OverlayCatalog::empty().with(
        OverlayKind::Diwali,
        OverlaySpec::new(vec!["lit".into()], Some(AudioCue::new("sparkle", 0.8))),
    );
    let mut overlays =
        OverlayCoordinator::new(catalog, OverlayPolicy::Exclusive, RecordingAudio::default())
            .with_trigger(OverlayKind::Diwali);

    overlays.handle_detector(DetectorEvent::Activated);
    let visible = overlays.visible();
    assert_eq!(visible.and_then(|o| o.message()), Some("lit"));
    assert_eq!(visible.and_then(|o| o.audio()).map(|a| a.volume), Some(0.8));
}

#[test]
fn test_zero_volume_mutes_and_raise_unmutes() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);
    overlays.open(OverlayKind::CheatCode);

    assert!(overlays.set_volume(OverlayKind::CheatCode, 0.0));
    let state = overlays.visible().and_then(|o| o.audio()).copied();
    assert!(state.is_some_and(|s| s.muted && !s.is_audible()));

    assert!(overlays.set_volume(OverlayKind::CheatCode, 1.5));
    let state = overlays.visible().and_then(|o| o.audio()).copied();
    assert!(state.is_some_and(|s| !s.muted && s.volume == 1.0));

    let calls = &overlays.audio_sink().calls;
    assert!(calls.contains(&Call::Muted(OverlayKind::CheatCode, true)));
    assert!(calls.contains(&Call::Muted(OverlayKind::CheatCode, false)));
    assert!(calls.contains(&Call::Volume(OverlayKind::CheatCode, 1.0)));
}

#[test]
fn test_non_finite_volume_is_rejected() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);
    overlays.open(OverlayKind::CheatCode);

    assert!(!overlays.set_volume(OverlayKind::CheatCode, f32::NAN));
    let state = overlays.visible().and_then(|o| o.audio()).copied();
    assert_eq!(state.map(|s| s.volume), Some(0.5));
}

#[test]
fn test_playback_and_mute_toggles() {
    let mut overlays = coordinator(OverlayPolicy::Exclusive);
    assert_eq!(overlays.toggle_playback(OverlayKind::CheatCode), None);

    overlays.open(OverlayKind::CheatCode);
    assert_eq!(overlays.toggle_playback(OverlayKind::CheatCode), Some(true));
    assert_eq!(overlays.toggle_playback(OverlayKind::CheatCode), Some(false));
    assert_eq!(overlays.toggle_mute(OverlayKind::CheatCode), Some(true));

    let calls = &overlays.audio_sink().calls;
    assert!(calls.contains(&Call::Pause(OverlayKind::CheatCode)));
    assert!(calls.contains(&Call::Resume(OverlayKind::CheatCode)));
    assert!(calls.contains(&Call::Muted(OverlayKind::CheatCode, true)));

    // Halloween has no track to control.
    overlays.open(OverlayKind::Halloween);
    assert_eq!(overlays.toggle_mute(OverlayKind::Halloween), None);
}
