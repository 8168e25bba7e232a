//! Configuration management for the head gesture application

use crate::{
    constants::{
        API_COOLDOWN_MS, DEFAULT_SINK_URL, DISPATCH_QUEUE_CAPACITY, DISPATCH_TIMEOUT_MS, MAX_FRAMES_TO_ANALYZE,
    },
    gesture_classifier::ClassifierSettings,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture classifier thresholds
    pub classifier: ClassifierSettings,

    /// Notification dispatch configuration
    pub notification: NotificationConfig,
}

/// Notification sink and rate limiting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Send notifications over HTTP (otherwise only log them)
    pub enabled: bool,

    /// Endpoint receiving `{"gesture": "<LABEL>"}` POSTs
    pub sink_url: String,

    /// Minimum milliseconds between two notification attempts
    pub cooldown_ms: u64,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Deliveries that may wait in the queue
    pub queue_capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sink_url: DEFAULT_SINK_URL.to_string(),
            cooldown_ms: API_COOLDOWN_MS,
            timeout_ms: DISPATCH_TIMEOUT_MS,
            queue_capacity: DISPATCH_QUEUE_CAPACITY,
        }
    }
}

impl NotificationConfig {
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let classifier = &self.classifier;

        if !(2..=MAX_FRAMES_TO_ANALYZE).contains(&classifier.frames_to_analyze) {
            return Err(Error::ConfigError(format!(
                "Window size must be between 2 and {MAX_FRAMES_TO_ANALYZE} frames"
            )));
        }

        let thresholds = [
            ("nodding_sensitivity", classifier.nodding_sensitivity),
            ("shaking_sensitivity", classifier.shaking_sensitivity),
            ("vertical_adjustment", classifier.vertical_adjustment),
            ("horizontal_adjustment", classifier.horizontal_adjustment),
            ("emergency_speed_threshold", classifier.emergency_speed_threshold),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::ConfigError(format!("{name} must be a positive number, got {value}")));
            }
        }

        if classifier.emergency_min_speed_frames == 0
            || classifier.emergency_min_speed_frames >= classifier.frames_to_analyze
        {
            return Err(Error::ConfigError(format!(
                "emergency_min_speed_frames must be between 1 and {}",
                classifier.frames_to_analyze - 1
            )));
        }

        let notification = &self.notification;
        if notification.sink_url.trim().is_empty() {
            return Err(Error::ConfigError("Sink URL must not be empty".to_string()));
        }
        if notification.timeout_ms == 0 {
            return Err(Error::ConfigError("Dispatch timeout must be greater than 0".to_string()));
        }
        if notification.queue_capacity == 0 {
            return Err(Error::ConfigError(
                "Dispatch queue capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head Gesture Configuration

# Gesture classifier thresholds (sensitivities and caps are scaled by face distance)
classifier:
  frames_to_analyze: 8
  nodding_sensitivity: 0.010
  shaking_sensitivity: 0.018
  vertical_adjustment: 0.18
  horizontal_adjustment: 0.1
  emergency_speed_threshold: 0.06
  emergency_min_speed_frames: 3

# Notification sink
notification:
  enabled: true
  sink_url: "http://127.0.0.1:3000/api"
  cooldown_ms: 1000
  timeout_ms: 500
  queue_capacity: 16
"#;
