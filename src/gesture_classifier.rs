//! Sliding-window head gesture classification.
//!
//! Each accepted frame pushes the chin onto the nod window and the side of the
//! head onto the shake window. Once both windows are full, an ordered list of
//! rules is evaluated against the current windows:
//!
//! 1. [`Gesture::Emergency`] when enough consecutive chin movements are fast
//! 2. [`Gesture::Yes`] when the chin oscillates in depth and the side of the head does not
//! 3. [`Gesture::No`] when the side of the head oscillates in depth and the chin does not
//!
//! The first matching rule wins and both windows are cleared, so the next
//! decision is made on a fresh window. All thresholds except the emergency
//! speed are scaled by the face's distance adjustment.

use crate::{
    constants::{
        EMERGENCY_MIN_SPEED_FRAMES, EMERGENCY_SPEED_THRESHOLD, FRAMES_TO_ANALYZE, HORIZONTAL_ADJUSTMENT,
        NODDING_SENSITIVITY, SHAKING_SENSITIVITY, VERTICAL_ADJUSTMENT,
    },
    landmarks::{Axis, LandmarkSample},
    window_buffer::WindowBuffer,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{cell::OnceCell, fmt};

/// Detected head gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    /// Nod
    Yes,
    /// Shake
    No,
    /// Vigorous nod
    Emergency,
}

impl Gesture {
    /// Label sent to the notification sink
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Emergency => "EMERGENCY",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tuning parameters for [`GestureClassifier`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Frames per observation window
    pub frames_to_analyze: usize,
    /// Base z deviation that counts as chin movement
    pub nodding_sensitivity: f64,
    /// Base z deviation that counts as side-of-head movement
    pub shaking_sensitivity: f64,
    /// Base cap on vertical chin spread for YES
    pub vertical_adjustment: f64,
    /// Base cap on horizontal side-of-head spread for NO
    pub horizontal_adjustment: f64,
    /// Per-frame vertical chin speed counted as fast
    pub emergency_speed_threshold: f64,
    /// Fast frames needed for EMERGENCY
    pub emergency_min_speed_frames: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            frames_to_analyze: FRAMES_TO_ANALYZE,
            nodding_sensitivity: NODDING_SENSITIVITY,
            shaking_sensitivity: SHAKING_SENSITIVITY,
            vertical_adjustment: VERTICAL_ADJUSTMENT,
            horizontal_adjustment: HORIZONTAL_ADJUSTMENT,
            emergency_speed_threshold: EMERGENCY_SPEED_THRESHOLD,
            emergency_min_speed_frames: EMERGENCY_MIN_SPEED_FRAMES,
        }
    }
}

/// Stateful per-face gesture classifier
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    settings: ClassifierSettings,
    nod_window: WindowBuffer,
    shake_window: WindowBuffer,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureClassifier {
    /// Create a classifier with the default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(ClassifierSettings::default())
    }

    /// Create a classifier with custom settings
    #[must_use]
    pub fn with_settings(settings: ClassifierSettings) -> Self {
        Self {
            nod_window: WindowBuffer::new(settings.frames_to_analyze),
            shake_window: WindowBuffer::new(settings.frames_to_analyze),
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Chin window used for nod tracking
    #[must_use]
    pub const fn nod_window(&self) -> &WindowBuffer {
        &self.nod_window
    }

    /// Side-of-head window used for shake tracking
    #[must_use]
    pub const fn shake_window(&self) -> &WindowBuffer {
        &self.shake_window
    }

    /// Feed one frame and return the gesture it completes, if any.
    ///
    /// The sample must have finite coordinates (see [`LandmarkSample::validate`]).
    pub fn classify(&mut self, sample: &LandmarkSample) -> Option<Gesture> {
        let distance_adjustment = sample.distance_adjustment();

        self.nod_window.push(sample.chin);
        self.shake_window.push(sample.side_head);

        if !self.nod_window.is_full() || !self.shake_window.is_full() {
            debug!(
                "Warming up: {}/{} frames",
                self.nod_window.len(),
                self.settings.frames_to_analyze
            );
            return None;
        }

        let gesture = {
            let snapshot = WindowSnapshot::new(&self.nod_window, &self.shake_window, distance_adjustment);
            Rule::PRIORITY
                .iter()
                .find_map(|rule| rule.evaluate(&snapshot, &self.settings))
        };

        if gesture.is_some() {
            self.reset();
        }
        gesture
    }

    /// Clear both windows and start a fresh observation
    pub fn reset(&mut self) {
        self.nod_window.clear();
        self.shake_window.clear();
    }
}

/// Classification rules in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Emergency,
    Nod,
    Shake,
}

impl Rule {
    const PRIORITY: [Self; 3] = [Self::Emergency, Self::Nod, Self::Shake];

    fn evaluate(self, window: &WindowSnapshot<'_>, settings: &ClassifierSettings) -> Option<Gesture> {
        let matched = match self {
            Self::Emergency => detect_emergency(
                window.nod,
                settings.emergency_speed_threshold,
                settings.emergency_min_speed_frames,
            ),
            Self::Nod => {
                let motion = window.motion(settings);
                motion.nod_changes > 0
                    && motion.shake_changes == 0
                    && motion.vertical_movement <= settings.vertical_adjustment * window.distance_adjustment
            }
            Self::Shake => {
                let motion = window.motion(settings);
                motion.shake_changes > 0
                    && motion.nod_changes == 0
                    && motion.horizontal_movement <= settings.horizontal_adjustment * window.distance_adjustment
            }
        };

        matched.then_some(match self {
            Self::Emergency => Gesture::Emergency,
            Self::Nod => Gesture::Yes,
            Self::Shake => Gesture::No,
        })
    }
}

/// Oscillation and extent measurements of one full window
#[derive(Debug, Clone, Copy)]
struct WindowMotion {
    nod_changes: usize,
    shake_changes: usize,
    vertical_movement: f64,
    horizontal_movement: f64,
}

/// Read-only view of both windows for one classification pass
struct WindowSnapshot<'a> {
    nod: &'a WindowBuffer,
    shake: &'a WindowBuffer,
    distance_adjustment: f64,
    motion: OnceCell<WindowMotion>,
}

impl<'a> WindowSnapshot<'a> {
    fn new(nod: &'a WindowBuffer, shake: &'a WindowBuffer, distance_adjustment: f64) -> Self {
        Self {
            nod,
            shake,
            distance_adjustment,
            motion: OnceCell::new(),
        }
    }

    /// Oscillation analysis, computed once and only if a rule needs it
    fn motion(&self, settings: &ClassifierSettings) -> WindowMotion {
        *self.motion.get_or_init(|| {
            let nod_values: Vec<f64> = self.nod.values(Axis::Z).collect();
            let shake_values: Vec<f64> = self.shake.values(Axis::Z).collect();
            let motion = WindowMotion {
                nod_changes: count_direction_changes(
                    &nod_values,
                    settings.nodding_sensitivity * self.distance_adjustment,
                ),
                shake_changes: count_direction_changes(
                    &shake_values,
                    settings.shaking_sensitivity * self.distance_adjustment,
                ),
                vertical_movement: self.nod.spread(Axis::Y),
                horizontal_movement: self.shake.spread(Axis::X),
            };
            debug!(
                "Window motion: nod_changes={} shake_changes={} vertical={:.4} horizontal={:.4} distance={:.3}",
                motion.nod_changes,
                motion.shake_changes,
                motion.vertical_movement,
                motion.horizontal_movement,
                self.distance_adjustment
            );
            motion
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Increasing,
    Decreasing,
}

/// Count peak/valley reversals in a sequence.
///
/// A running reference starts at the first value. A later value only
/// registers when it deviates from the reference by more than `sensitivity`;
/// the first such value establishes a direction, every later one pointing the
/// other way counts as a reversal. Both establish and reverse move the
/// reference to the current value.
///
/// Every peak and valley is counted, so `[0.0, 0.0, 0.02, 0.0, 0.02, 0.0, 0.0, 0.0]`
/// at `0.01` gives 3. Keeping the first direction fixed instead would count fewer
/// reversals on the same input, but the first reversal lands on the same sample
/// either way. Classification only tests zero against non-zero, so both readings
/// yield the same gestures.
pub fn count_direction_changes(values: &[f64], sensitivity: f64) -> usize {
    let Some(&first) = values.first() else {
        return 0;
    };

    let mut reference = first;
    let mut direction: Option<Direction> = None;
    let mut changes = 0;

    for &value in &values[1..] {
        if (reference - value).abs() <= sensitivity {
            continue;
        }

        let current = if reference > value {
            Direction::Increasing
        } else {
            Direction::Decreasing
        };

        match direction {
            Some(previous) if previous != current => {
                changes += 1;
                direction = Some(current);
                reference = value;
            }
            Some(_) => {}
            None => {
                direction = Some(current);
                reference = value;
            }
        }
    }

    changes
}

/// Whether the chin moved vertically faster than `speed_threshold` in at
/// least `min_fast_frames` consecutive-frame steps
pub fn detect_emergency(chin: &WindowBuffer, speed_threshold: f64, min_fast_frames: usize) -> bool {
    if chin.len() < 2 {
        return false;
    }
    let fast_frames = chin.speeds(Axis::Y).filter(|&speed| speed > speed_threshold).count();
    fast_frames >= min_fast_frames
}
