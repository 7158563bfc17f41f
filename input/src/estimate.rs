//! Reduces eye landmarks to the single normalized position the recognizer consumes.

use std::time::Instant;

use gazeswipe_geometry::Point;

use crate::Sample;

/// The landmark points of both eyes of one face, in normalized screen coordinates.
#[derive(Debug, Clone, Default)]
pub struct EyeLandmarks {
    pub left: Vec<Point>,
    pub right: Vec<Point>,
}

impl EyeLandmarks {
    pub fn new(left: impl Into<Vec<Point>>, right: impl Into<Vec<Point>>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// The midpoint between both eye centers.
    ///
    /// `None` if the landmarks of either eye are missing.
    pub fn gaze_position(&self) -> Option<Point> {
        let left = eye_center(&self.left)?;
        let right = eye_center(&self.right)?;
        Some(left.midpoint(right))
    }

    pub fn sample(&self, time: Instant) -> Option<Sample> {
        self.gaze_position()
            .map(|position| Sample::new(position, time))
    }
}

/// The center of one eye: the mean of its landmark points.
pub fn eye_center(points: &[Point]) -> Option<Point> {
    Point::centroid(points.iter().copied())
}
