//! Behavioural tests for the sliding-window gesture classifier


use head_gesture::{
    gesture_classifier::{ClassifierSettings, Gesture, GestureClassifier},
    landmarks::Point3,
};
use test_helpers::{
    chin_height_frames, detected, feed, nod_frames, sample, sample_at_distance, shake_frames, still_frames, CHIN,
    SIDE_HEAD,
};

const NOD_PATTERN: [f64; 8] = [0.0, 0.0, 0.02, 0.0, 0.02, 0.0, 0.0, 0.0];
const SHAKE_PATTERN: [f64; 8] = [0.0, 0.0, 0.04, 0.0, 0.04, 0.0, 0.0, 0.0];

#[test]
fn test_no_gesture_while_warming_up() {
    let mut classifier = GestureClassifier::new();

    // Even a vigorous pattern cannot fire before the window is full
    let frames = chin_height_frames(&[0.3, 0.5, 0.3, 0.5, 0.3, 0.5, 0.3]);
    let results = feed(&mut classifier, &frames);

    assert!(results.iter().all(Option::is_none));
    assert_eq!(classifier.nod_window().len(), 7);
    assert_eq!(classifier.shake_window().len(), 7);
}

#[test]
fn test_nod_detected_when_window_fills() {
    let mut classifier = GestureClassifier::new();
    let results = feed(&mut classifier, &nod_frames(&NOD_PATTERN));

    assert!(results[..7].iter().all(Option::is_none));
    assert_eq!(results[7], Some(Gesture::Yes));
    assert!(classifier.nod_window().is_empty());
    assert!(classifier.shake_window().is_empty());
}

#[test]
fn test_shake_detected_when_window_fills() {
    let mut classifier = GestureClassifier::new();
    let results = feed(&mut classifier, &shake_frames(&SHAKE_PATTERN));

    assert_eq!(results.into_iter().flatten().collect::<Vec<_>>(), vec![Gesture::No]);
    assert!(classifier.nod_window().is_empty());
}

#[test]
fn test_emergency_on_vigorous_nod() {
    let mut classifier = GestureClassifier::new();
    let frames = chin_height_frames(&[0.30, 0.38, 0.46, 0.54, 0.46, 0.38, 0.30, 0.30]);
    let results = feed(&mut classifier, &frames);

    assert_eq!(results[7], Some(Gesture::Emergency));
    assert!(classifier.nod_window().is_empty());
    assert!(classifier.shake_window().is_empty());
}

#[test]
fn test_two_fast_frames_are_not_an_emergency() {
    let mut classifier = GestureClassifier::new();
    let frames = chin_height_frames(&[0.40, 0.40, 0.48, 0.56, 0.56, 0.56, 0.56, 0.56]);

    assert!(detected(&mut classifier, &frames).is_empty());
}

#[test]
fn test_emergency_preempts_nod() {
    let mut classifier = GestureClassifier::new();
    let ys = [0.30, 0.40, 0.30, 0.40, 0.30, 0.30, 0.30, 0.30];
    let frames: Vec<_> = ys
        .iter()
        .zip(NOD_PATTERN)
        .map(|(&y, z)| sample(Point3::new(CHIN.x, y, z), SIDE_HEAD))
        .collect();

    assert_eq!(detected(&mut classifier, &frames), vec![Gesture::Emergency]);
}

#[test]
fn test_oscillation_on_both_axes_is_ambiguous() {
    let mut classifier = GestureClassifier::new();
    let frames: Vec<_> = NOD_PATTERN
        .iter()
        .zip(SHAKE_PATTERN)
        .map(|(&chin_z, side_z)| {
            sample(
                Point3::new(CHIN.x, CHIN.y, chin_z),
                Point3::new(SIDE_HEAD.x, SIDE_HEAD.y, side_z),
            )
        })
        .collect();

    assert!(detected(&mut classifier, &frames).is_empty());
    // Undecided windows keep rolling
    assert!(classifier.nod_window().is_full());
}

#[test]
fn test_large_vertical_motion_is_not_a_nod() {
    let mut classifier = GestureClassifier::new();
    // Slow drift (below emergency speed) spanning more than the vertical cap
    let frames: Vec<_> = NOD_PATTERN
        .iter()
        .enumerate()
        .map(|(i, &z)| sample(Point3::new(CHIN.x, 0.3 + 0.04 * i as f64, z), SIDE_HEAD))
        .collect();

    assert!(detected(&mut classifier, &frames).is_empty());
}

#[test]
fn test_large_horizontal_motion_is_not_a_shake() {
    let mut classifier = GestureClassifier::new();
    let frames: Vec<_> = SHAKE_PATTERN
        .iter()
        .enumerate()
        .map(|(i, &z)| sample(CHIN, Point3::new(0.5 + 0.03 * i as f64, SIDE_HEAD.y, z)))
        .collect();

    assert!(detected(&mut classifier, &frames).is_empty());
}

#[test]
fn test_continuous_tilt_is_not_a_nod() {
    let mut classifier = GestureClassifier::new();
    let tilt: Vec<f64> = (0..16).map(|i| 0.02 * f64::from(i)).collect();

    assert!(detected(&mut classifier, &nod_frames(&tilt)).is_empty());
}

#[test]
fn test_jitter_below_sensitivity() {
    let mut classifier = GestureClassifier::new();
    let jitter: Vec<f64> = (0..24).map(|i| if i % 2 == 0 { 0.0 } else { 0.008 }).collect();

    assert!(detected(&mut classifier, &nod_frames(&jitter)).is_empty());
    assert!(detected(&mut classifier, &shake_frames(&jitter)).is_empty());
}

#[test]
fn test_thresholds_scale_with_face_distance() {
    let small_nod = [0.0, 0.0, 0.008, 0.0, 0.008, 0.0, 0.0, 0.0];
    let frames_at = |distance: f64| -> Vec<_> {
        small_nod
            .iter()
            .map(|&z| sample_at_distance(Point3::new(CHIN.x, CHIN.y, z), SIDE_HEAD, distance))
            .collect()
    };

    // Close face: 0.008 is below 0.010 * 1.0
    let mut classifier = GestureClassifier::new();
    assert!(detected(&mut classifier, &frames_at(1.0)).is_empty());

    // Distant face: sensitivity drops to 0.005
    let mut classifier = GestureClassifier::new();
    assert_eq!(detected(&mut classifier, &frames_at(0.5)), vec![Gesture::Yes]);
}

#[test]
fn test_window_restarts_after_gesture() {
    let mut classifier = GestureClassifier::new();
    assert_eq!(detected(&mut classifier, &nod_frames(&NOD_PATTERN)), vec![Gesture::Yes]);

    // The next decision needs a complete fresh window
    let results = feed(&mut classifier, &shake_frames(&SHAKE_PATTERN));
    assert!(results[..7].iter().all(Option::is_none));
    assert_eq!(results[7], Some(Gesture::No));
}

#[test]
fn test_no_leakage_after_emergency() {
    let mut classifier = GestureClassifier::new();
    let vigorous = chin_height_frames(&[0.30, 0.38, 0.46, 0.54, 0.46, 0.38, 0.30, 0.30]);
    assert_eq!(detected(&mut classifier, &vigorous), vec![Gesture::Emergency]);

    // A calm window after the emergency stays silent
    assert!(detected(&mut classifier, &still_frames(8)).is_empty());
}

#[test]
fn test_gesture_once_oscillation_enters_rolling_window() {
    let mut classifier = GestureClassifier::new();
    assert!(detected(&mut classifier, &still_frames(8)).is_empty());

    let results = feed(&mut classifier, &nod_frames(&[0.02, 0.0]));
    assert_eq!(results, vec![None, Some(Gesture::Yes)]);
}

#[test]
fn test_repeated_nodding_fires_once_per_window() {
    let mut classifier = GestureClassifier::new();
    let nodding: Vec<f64> = NOD_PATTERN.iter().chain(NOD_PATTERN.iter()).copied().collect();

    let results = feed(&mut classifier, &nod_frames(&nodding));
    let fired: Vec<usize> = results
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.map(|_| i))
        .collect();
    assert_eq!(fired, vec![7, 15]);
}

#[test]
fn test_reset_discards_partial_window() {
    let mut classifier = GestureClassifier::new();
    let frames = nod_frames(&NOD_PATTERN);

    feed(&mut classifier, &frames[..7]);
    classifier.reset();
    assert!(classifier.nod_window().is_empty());

    // The eighth frame alone cannot complete a window
    assert_eq!(classifier.classify(&frames[7]), None);
}

#[test]
fn test_custom_window_size() {
    let settings = ClassifierSettings {
        frames_to_analyze: 4,
        ..ClassifierSettings::default()
    };
    let mut classifier = GestureClassifier::with_settings(settings);

    let results = feed(&mut classifier, &nod_frames(&[0.0, 0.02, 0.0, 0.0]));
    assert_eq!(results, vec![None, None, None, Some(Gesture::Yes)]);
}
