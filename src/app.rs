//! Main application module: classifies a stream of landmark frames and
//! dispatches the detected gestures.

use crate::{
    config::Config,
    error::{Error, Result},
    gesture_classifier::{Gesture, GestureClassifier},
    landmarks::{LandmarkSample, Point3},
    notification::{GestureSink, HttpSink, LogSink, MetricsSnapshot, NotificationDispatcher},
};
use log::{debug, info, warn};
use serde::Deserialize;
use std::{io::BufRead, sync::Arc};

/// One line of the frame stream
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FrameInput {
    /// The four tracked points
    Sample(LandmarkSample),
    /// A full face mesh; empty when no face was found
    Mesh { landmarks: Vec<Point3> },
}

impl FrameInput {
    /// Extract the tracked points, `Ok(None)` when the frame has no face
    pub fn into_sample(self) -> Result<Option<LandmarkSample>> {
        let sample = match self {
            Self::Sample(sample) => sample,
            Self::Mesh { landmarks } if landmarks.is_empty() => return Ok(None),
            Self::Mesh { landmarks } => LandmarkSample::from_face_mesh(&landmarks)?,
        };
        sample.validate()?;
        Ok(Some(sample))
    }
}

/// Counts from one [`GestureApp::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank lines read
    pub frames: usize,
    /// Lines that were malformed, invalid, or had no face
    pub skipped: usize,
    pub yes: usize,
    pub no: usize,
    pub emergency: usize,
}

impl RunSummary {
    fn record(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Yes => self.yes += 1,
            Gesture::No => self.no += 1,
            Gesture::Emergency => self.emergency += 1,
        }
    }

    /// Total gestures detected
    #[must_use]
    pub const fn gestures(&self) -> usize {
        self.yes + self.no + self.emergency
    }
}

/// Classifier and dispatcher for one tracked face
pub struct GestureApp {
    classifier: GestureClassifier,
    dispatcher: NotificationDispatcher,
}

impl GestureApp {
    /// Build the application from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let sink: Arc<dyn GestureSink> = if config.notification.enabled {
            info!("Sending gestures to {}", config.notification.sink_url);
            Arc::new(HttpSink::new(
                config.notification.sink_url.clone(),
                config.notification.timeout(),
            ))
        } else {
            info!("Notifications disabled, logging gestures only");
            Arc::new(LogSink)
        };

        Self::with_sink(config, sink)
    }

    /// Build the application with a custom sink
    pub fn with_sink(config: &Config, sink: Arc<dyn GestureSink>) -> Result<Self> {
        config.validate()?;

        let dispatcher = NotificationDispatcher::new(
            sink,
            config.notification.cooldown(),
            config.notification.queue_capacity,
        )?;

        Ok(Self {
            classifier: GestureClassifier::with_settings(config.classifier.clone()),
            dispatcher,
        })
    }

    /// Classify one frame and notify the sink of any gesture
    pub fn process_sample(&mut self, sample: &LandmarkSample) -> Option<Gesture> {
        let gesture = self.classifier.classify(sample)?;
        info!("Detected gesture: {gesture}");
        self.dispatcher.notify(gesture);
        Some(gesture)
    }

    /// Consume a JSON-lines frame stream until end of input
    pub fn run<R, F>(&mut self, reader: R, mut on_gesture: F) -> Result<RunSummary>
    where
        R: BufRead,
        F: FnMut(Gesture),
    {
        let mut summary = RunSummary::default();

        for (index, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes?;
            let Ok(line) = std::str::from_utf8(&bytes) else {
                warn!("Line {}: skipping frame: not valid UTF-8", index + 1);
                summary.frames += 1;
                summary.skipped += 1;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            summary.frames += 1;

            let sample = match serde_json::from_str::<FrameInput>(line)
                .map_err(Error::from)
                .and_then(FrameInput::into_sample)
            {
                Ok(Some(sample)) => sample,
                Ok(None) => {
                    debug!("Line {}: no face in frame", index + 1);
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!("Line {}: skipping frame: {e}", index + 1);
                    summary.skipped += 1;
                    continue;
                }
            };

            if let Some(gesture) = self.process_sample(&sample) {
                summary.record(gesture);
                on_gesture(gesture);
            }
        }

        info!(
            "Processed {} frames ({} skipped): {} YES, {} NO, {} EMERGENCY",
            summary.frames, summary.skipped, summary.yes, summary.no, summary.emergency
        );
        Ok(summary)
    }

    #[must_use]
    pub const fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Dispatcher counters
    #[must_use]
    pub fn notification_metrics(&self) -> MetricsSnapshot {
        self.dispatcher.metrics()
    }

    /// Wait for queued notifications and stop the dispatcher
    pub fn shutdown(self) -> MetricsSnapshot {
        self.dispatcher.shutdown()
    }
}
