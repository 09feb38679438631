//! Cheat-code detection on a simulated clock.

use folio_overlays::{DEFAULT_DWELL, DetectorEvent, KONAMI_CODE, SequenceDetector};
use std::time::{Duration, Instant};

fn type_keys(
    detector: &mut SequenceDetector<String>,
    keys: &[&str],
    now: Instant,
) -> Vec<DetectorEvent> {
    keys.iter()
        .filter_map(|k| detector.observe((*k).to_string(), now))
        .collect()
}

#[test]
fn test_konami_activates_once() {
    let now = Instant::now();
    let mut detector = SequenceDetector::konami();

    let events = type_keys(&mut detector, &KONAMI_CODE, now);
    assert_eq!(events, vec![DetectorEvent::Activated]);
    assert!(detector.is_active());
}

#[test]
fn test_transposed_pair_does_not_activate() {
    let now = Instant::now();
    let mut detector = SequenceDetector::konami();

    let mut keys = KONAMI_CODE;
    keys.swap(4, 5);
    assert!(type_keys(&mut detector, &keys, now).is_empty());
    assert!(!detector.is_active());
}

#[test]
fn test_noise_before_code_is_ignored() {
    let now = Instant::now();
    let mut detector = SequenceDetector::konami();

    type_keys(&mut detector, &["x", "ArrowUp", "Enter", "a"], now);
    let events = type_keys(&mut detector, &KONAMI_CODE, now);
    assert_eq!(events, vec![DetectorEvent::Activated]);
}

#[test]
fn test_deactivates_after_exactly_ten_seconds() {
    let start = Instant::now();
    let mut detector = SequenceDetector::konami();
    type_keys(&mut detector, &KONAMI_CODE, start);

    assert_eq!(detector.next_deadline(), Some(start + DEFAULT_DWELL));
    assert_eq!(detector.poll(start + Duration::from_millis(9_999)), None);
    assert!(detector.is_active());
    assert_eq!(
        detector.poll(start + Duration::from_secs(10)),
        Some(DetectorEvent::Deactivated)
    );
    assert!(!detector.is_active());
    assert_eq!(detector.next_deadline(), None);
}

#[test]
fn test_retrigger_restarts_dwell() {
    let start = Instant::now();
    let mut detector = SequenceDetector::konami();
    type_keys(&mut detector, &KONAMI_CODE, start);

    let again = start + Duration::from_secs(6);
    assert!(type_keys(&mut detector, &KONAMI_CODE, again).is_empty());

    // The first activation's deadline has passed without effect.
    assert_eq!(detector.poll(start + Duration::from_secs(10)), None);
    assert!(detector.is_active());
    assert_eq!(
        detector.poll(again + DEFAULT_DWELL),
        Some(DetectorEvent::Deactivated)
    );
}

#[test]
fn test_reactivates_after_expiry() {
    let start = Instant::now();
    let mut detector = SequenceDetector::konami();
    type_keys(&mut detector, &KONAMI_CODE, start);
    detector.poll(start + DEFAULT_DWELL);

    let later = start + Duration::from_secs(30);
    let events = type_keys(&mut detector, &KONAMI_CODE, later);
    assert_eq!(events, vec![DetectorEvent::Activated]);
}
