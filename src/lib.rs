//! Head gesture recognition from facial landmarks.
//!
//! This library classifies intentional head gestures from a stream of
//! facial-landmark frames, one frame per video image:
//! - `YES`: a repeated nod (chin oscillating in depth)
//! - `NO`: a repeated shake (side of the head oscillating in depth)
//! - `EMERGENCY`: a vigorous nod (several fast vertical chin movements)
//!
//! The pipeline consists of:
//! 1. Selecting four tracked points per frame (chin, side, top and bottom of head)
//! 2. Sliding-window classification scaled by the face's distance from the camera
//! 3. Cooldown-gated, non-blocking notification of each detected gesture
//!
//! Landmark extraction and video capture happen outside this crate.
//!
//! # Examples
//!
//! ## Classifying Frames
//!
//! ```
//! use head_gesture::{
//!     gesture_classifier::{Gesture, GestureClassifier},
//!     landmarks::{LandmarkSample, Point3},
//! };
//!
//! let mut classifier = GestureClassifier::new();
//! let mut detected = None;
//!
//! for z in [0.0, 0.0, 0.02, 0.0, 0.02, 0.0, 0.0, 0.0] {
//!     let sample = LandmarkSample::new(
//!         Point3::new(0.5, 0.6, z),    // chin
//!         Point3::new(0.8, 0.4, 0.0),  // side of head
//!         Point3::new(0.5, 0.2, 0.0),  // top of head
//!         Point3::new(0.5, 0.7, 0.0),  // bottom of head
//!     );
//!     detected = classifier.classify(&sample);
//! }
//!
//! assert_eq!(detected, Some(Gesture::Yes));
//! ```
//!
//! ## Dispatching Notifications
//!
//! ```no_run
//! use head_gesture::{
//!     gesture_classifier::Gesture,
//!     notification::{HttpSink, NotificationDispatcher},
//! };
//! use std::{sync::Arc, time::Duration};
//!
//! # fn main() -> head_gesture::Result<()> {
//! let sink = Arc::new(HttpSink::new("http://127.0.0.1:3000/api", Duration::from_millis(500)));
//! let mut dispatcher = NotificationDispatcher::new(sink, Duration::from_secs(1), 16)?;
//!
//! // Returns immediately; delivery happens on a background thread
//! dispatcher.notify(Gesture::Yes);
//! // Dropped: still within the cooldown
//! dispatcher.notify(Gesture::No);
//!
//! dispatcher.shutdown();
//! # Ok(())
//! # }
//! ```

/// Facial landmark types and face-mesh point selection
pub mod landmarks;

/// Fixed-capacity sliding window of tracked points
pub mod window_buffer;

/// Sliding-window YES / NO / EMERGENCY classifier
pub mod gesture_classifier;

/// Cooldown-gated, non-blocking gesture notification
pub mod notification;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
pub use gesture_classifier::{Gesture, GestureClassifier};
pub use landmarks::{LandmarkSample, Point3};
