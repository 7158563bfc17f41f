//! The samples collected during one gesture attempt and the swipe test over them.

use std::time::{Duration, Instant};

use itertools::{Itertools, MinMaxResult};

use crate::{RecognizerConfig, Sample};

/// The samples of one attempt, oldest first.
///
/// A trajectory always starts with the sample that entered the trigger zone, so it is never empty.
#[derive(Debug, Clone)]
pub struct Trajectory {
    first: Sample,
    following: Vec<Sample>,
}

impl Trajectory {
    pub fn new(first: Sample) -> Self {
        Self {
            first,
            following: Vec::new(),
        }
    }

    /// Appends a sample. Timestamps must not decrease.
    pub fn push(&mut self, sample: Sample) {
        debug_assert!(
            sample.time >= self.last().time,
            "Sample arrived with an earlier timestamp."
        );
        self.following.push(sample);
    }

    pub fn first(&self) -> &Sample {
        &self.first
    }

    pub fn last(&self) -> &Sample {
        self.following.last().unwrap_or(&self.first)
    }

    pub fn len(&self) -> usize {
        1 + self.following.len()
    }

    /// The instant the attempt began.
    pub fn began(&self) -> Instant {
        self.first.time
    }

    /// Time between the first and the most recent sample.
    pub fn duration(&self) -> Duration {
        self.last().time.saturating_duration_since(self.first.time)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        std::iter::once(&self.first).chain(self.following.iter())
    }

    /// Upward displacement from the first to the most recent sample.
    ///
    /// Positive if the gaze moved up (y grows downward).
    pub fn vertical_movement(&self) -> f64 {
        self.first.position.y - self.last().position.y
    }

    /// The vertical extent covered by all samples, regardless of direction.
    pub fn vertical_span(&self) -> f64 {
        match self.iter().map(|s| s.position.y).minmax_by(f64::total_cmp) {
            MinMaxResult::MinMax(min, max) => max - min,
            MinMaxResult::OneElement(_) | MinMaxResult::NoElements => 0.0,
        }
    }

    /// `true` if the gaze moved up by more than the vertical threshold and is still inside the
    /// trigger zone.
    pub fn matches_swipe(&self, config: &RecognizerConfig) -> bool {
        self.vertical_movement() > config.vertical_threshold
            && config.in_zone(self.last().position)
    }
}
