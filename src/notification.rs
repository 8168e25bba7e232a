//! Rate-limited, non-blocking gesture notifications.
//!
//! [`NotificationDispatcher::notify`] decides synchronously whether a gesture
//! may be sent (cooldown gate), records the attempt time, and hands the
//! gesture to a background worker over a bounded channel. The caller never
//! waits on the network: a full queue drops the attempt instead of blocking.
//! Delivery failures are logged and counted, never retried.

use crate::{gesture_classifier::Gesture, Error, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, warn};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

/// Destination for detected gestures
pub trait GestureSink: Send + Sync {
    /// Deliver one gesture; implementations enforce their own timeout
    fn deliver(&self, gesture: Gesture) -> Result<()>;

    /// Sink name for logging
    fn name(&self) -> &str;
}

/// Sink that POSTs `{"gesture": "<LABEL>"}` to an HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpSink {
    url: String,
    timeout: Duration,
}

impl HttpSink {
    /// Create a sink for `url` with a per-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl GestureSink for HttpSink {
    fn deliver(&self, gesture: Gesture) -> Result<()> {
        let body = serde_json::json!({ "gesture": gesture.as_str() });

        ureq::post(&self.url)
            .timeout(self.timeout)
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    Error::Notification(format!("{} returned status {code}", self.url))
                }
                ureq::Error::Transport(t) => Error::Notification(format!("Transport error: {t}")),
            })?;

        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Sink that only logs gestures
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl GestureSink for LogSink {
    fn deliver(&self, gesture: Gesture) -> Result<()> {
        info!("Gesture notification: {gesture}");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Dispatcher counters
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    attempted: AtomicU64,
    suppressed: AtomicU64,
    dropped: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

impl DispatchMetrics {
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            attempted: self.attempted.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`DispatchMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Notifications that passed the cooldown gate
    pub attempted: u64,
    /// Notifications dropped by the cooldown gate
    pub suppressed: u64,
    /// Attempts dropped because the delivery queue was full or closed
    pub dropped: u64,
    /// Deliveries the sink accepted
    pub delivered: u64,
    /// Deliveries the sink rejected or timed out
    pub failed: u64,
}

/// Cooldown-gated, fire-and-forget gesture dispatcher
pub struct NotificationDispatcher {
    cooldown: Duration,
    last_attempt: Option<Instant>,
    tx: Option<Sender<Gesture>>,
    metrics: Arc<DispatchMetrics>,
    worker: Option<thread::JoinHandle<()>>,
}

impl NotificationDispatcher {
    /// Start a dispatcher delivering to `sink` on a background thread
    pub fn new(sink: Arc<dyn GestureSink>, cooldown: Duration, queue_capacity: usize) -> Result<Self> {
        if queue_capacity == 0 {
            return Err(Error::InvalidInput("Dispatch queue capacity must be greater than 0".to_string()));
        }

        let (tx, rx) = bounded(queue_capacity);
        let metrics = Arc::new(DispatchMetrics::default());
        let worker_metrics = Arc::clone(&metrics);

        let worker = thread::Builder::new()
            .name("gesture-dispatch".to_string())
            .spawn(move || Self::deliver_loop(&*sink, &rx, &worker_metrics))?;

        Ok(Self {
            cooldown,
            last_attempt: None,
            tx: Some(tx),
            metrics,
            worker: Some(worker),
        })
    }

    /// Notify the sink of `gesture` unless still cooling down.
    ///
    /// Returns whether a delivery attempt was queued.
    pub fn notify(&mut self, gesture: Gesture) -> bool {
        self.notify_at(gesture, Instant::now())
    }

    /// [`notify`](Self::notify) with an explicit current time
    pub fn notify_at(&mut self, gesture: Gesture, now: Instant) -> bool {
        if let Some(last) = self.last_attempt {
            if now.saturating_duration_since(last) < self.cooldown {
                self.metrics.suppressed.fetch_add(1, Ordering::Relaxed);
                debug!("Notification for {gesture} suppressed by cooldown");
                return false;
            }
        }

        self.last_attempt = Some(now);
        self.metrics.attempted.fetch_add(1, Ordering::Relaxed);

        let Some(tx) = &self.tx else {
            self.metrics.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        };

        match tx.try_send(gesture) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.metrics.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("Dispatch queue full, dropping {gesture} notification");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("Dispatch worker stopped, dropping {gesture} notification");
                false
            }
        }
    }

    /// Current counters
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Close the queue, wait for queued deliveries to finish and return the
    /// final counters
    pub fn shutdown(mut self) -> MetricsSnapshot {
        self.stop();
        self.metrics.snapshot()
    }

    fn stop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("Dispatch worker panicked");
            }
        }
    }

    fn deliver_loop(sink: &dyn GestureSink, rx: &Receiver<Gesture>, metrics: &DispatchMetrics) {
        for gesture in rx {
            match sink.deliver(gesture) {
                Ok(()) => {
                    metrics.delivered.fetch_add(1, Ordering::Relaxed);
                    info!("Sent {gesture} via {} sink", sink.name());
                }
                Err(e) => {
                    metrics.failed.fetch_add(1, Ordering::Relaxed);
                    warn!("Failed to send {gesture} via {} sink: {e}", sink.name());
                }
            }
        }
        debug!("Dispatch worker exiting");
    }
}

impl Drop for NotificationDispatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
