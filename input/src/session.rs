//! The state a gaze input UI keeps around the recognizer: the tracking toggle, gesture counters,
//! and the status of the eye position source.

use std::time::{Duration, Instant};

use derive_more::Deref;
use gazeswipe_geometry::Point;
use log::{debug, info, warn};

use crate::{GazeEvent, GazeSwipeRecognizer, RecognizerConfig, Sample};

/// Availability of the upstream eye position source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceStatus {
    /// No sample has been received yet.
    #[default]
    Waiting,
    Available,
    /// The source reported a failure, for example missing camera permission.
    Unavailable(String),
}

#[derive(Debug, Deref)]
pub struct GazeSession {
    #[deref]
    recognizer: GazeSwipeRecognizer,
    tracking_enabled: bool,
    attempts: u64,
    successful_gestures: u64,
    last_sample: Option<Sample>,
    source_status: SourceStatus,
}

impl Default for GazeSession {
    fn default() -> Self {
        Self::new(RecognizerConfig::default())
    }
}

impl GazeSession {
    /// Creates a session with tracking enabled.
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            recognizer: GazeSwipeRecognizer::new(config),
            tracking_enabled: true,
            attempts: 0,
            successful_gestures: 0,
            last_sample: None,
            source_status: SourceStatus::Waiting,
        }
    }

    /// Feeds a sample to the recognizer while tracking is enabled. Returns no events otherwise.
    pub fn feed(&mut self, sample: Sample) -> Vec<GazeEvent> {
        if !self.tracking_enabled {
            return Vec::new();
        }

        if self.source_status != SourceStatus::Available {
            info!("Eye position source available");
            self.source_status = SourceStatus::Available;
        }
        self.last_sample = Some(sample);

        let events = self.recognizer.feed(sample);
        for event in &events {
            match event {
                GazeEvent::TrackingStateChanged(true) => self.attempts += 1,
                GazeEvent::GestureDetected => {
                    self.successful_gestures += 1;
                    info!("Gaze swipe #{}", self.successful_gestures);
                }
                _ => {}
            }
        }
        events
    }

    pub fn is_tracking_enabled(&self) -> bool {
        self.tracking_enabled
    }

    /// Enables or disables tracking. Disabling abandons the current attempt.
    pub fn set_tracking_enabled(&mut self, enabled: bool) -> Option<GazeEvent> {
        if enabled == self.tracking_enabled {
            return None;
        }
        debug!("Tracking {}", if enabled { "enabled" } else { "disabled" });
        self.tracking_enabled = enabled;
        if enabled {
            return None;
        }
        self.recognizer.reset()
    }

    pub fn toggle_tracking(&mut self) -> Option<GazeEvent> {
        self.set_tracking_enabled(!self.tracking_enabled)
    }

    /// Zeroes the counters and abandons the current attempt.
    pub fn reset_counters(&mut self) -> Option<GazeEvent> {
        self.attempts = 0;
        self.successful_gestures = 0;
        self.recognizer.reset()
    }

    /// Abandons the current attempt so calibration starts from a clean state.
    pub fn start_calibration(&mut self) -> Option<GazeEvent> {
        debug!("Starting calibration");
        self.recognizer.reset()
    }

    pub fn configure(&mut self, config: RecognizerConfig) {
        self.recognizer.configure(config);
    }

    /// Number of attempts started since the last counter reset.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn successful_gestures(&self) -> u64 {
        self.successful_gestures
    }

    /// The most recently observed eye position.
    pub fn eye_position(&self) -> Option<Point> {
        self.last_sample.map(|s| s.position)
    }

    /// `true` if the most recent eye position lies inside the trigger zone.
    pub fn in_gesture_zone(&self) -> bool {
        self.eye_position()
            .is_some_and(|position| self.recognizer.in_zone(position))
    }

    pub fn report_source_unavailable(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("Eye position source unavailable: {reason}");
        self.source_status = SourceStatus::Unavailable(reason);
    }

    pub fn source_status(&self) -> &SourceStatus {
        &self.source_status
    }

    /// Time since the last sample was received. `None` if there was none yet.
    pub fn source_silence(&self, now: Instant) -> Option<Duration> {
        self.last_sample
            .map(|s| now.saturating_duration_since(s.time))
    }

    /// `true` if samples were received before but none for longer than `max_silence`.
    pub fn is_source_silent(&self, now: Instant, max_silence: Duration) -> bool {
        self.source_silence(now)
            .is_some_and(|silence| silence > max_silence)
    }
}
