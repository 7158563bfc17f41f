use std::time::Duration;

use anyhow::{Result, bail};
use gazeswipe_geometry::Point;
use log::warn;

/// Thresholds of the gaze swipe recognizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerConfig {
    /// Horizontal position the gaze must exceed to be inside the trigger zone.
    pub edge_threshold: f64,
    /// Minimum upward displacement between the first and the latest sample of an attempt.
    pub vertical_threshold: f64,
    /// Number of buffered samples needed before a match is evaluated.
    pub min_samples_for_match: usize,
    /// Maximum time from zone entry to match.
    pub attempt_timeout: Duration,
}

impl RecognizerConfig {
    pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.95;
    pub const DEFAULT_VERTICAL_THRESHOLD: f64 = 0.2;
    pub const DEFAULT_MIN_SAMPLES_FOR_MATCH: usize = 5;
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(1);

    /// `true` if the position lies inside the trigger zone. The threshold itself is outside.
    pub fn in_zone(&self, position: Point) -> bool {
        position.x > self.edge_threshold
    }

    pub fn validate(&self) -> Result<()> {
        if !self.edge_threshold.is_finite() {
            bail!("Edge threshold must be finite, was: {}", self.edge_threshold);
        }
        if !self.vertical_threshold.is_finite() {
            bail!(
                "Vertical threshold must be finite, was: {}",
                self.vertical_threshold
            );
        }
        if self.min_samples_for_match == 0 {
            bail!("At least one sample is required for a match");
        }

        if !(0.0..=1.0).contains(&self.edge_threshold) {
            warn!(
                "Edge threshold {} lies outside the screen, the trigger zone may be unreachable",
                self.edge_threshold
            );
        }
        if self.vertical_threshold < 0.0 {
            warn!(
                "Vertical threshold {} is negative, downward movement will match",
                self.vertical_threshold
            );
        }
        Ok(())
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            edge_threshold: Self::DEFAULT_EDGE_THRESHOLD,
            vertical_threshold: Self::DEFAULT_VERTICAL_THRESHOLD,
            min_samples_for_match: Self::DEFAULT_MIN_SAMPLES_FOR_MATCH,
            attempt_timeout: Self::DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}
