use std::time::Instant;

use derive_more::Constructor;
use gazeswipe_geometry::Point;

/// A single eye position estimate at a point in time.
#[derive(Debug, Copy, Clone, PartialEq, Constructor)]
pub struct Sample {
    /// Normalized screen position. May lie slightly outside `0.0..=1.0`.
    pub position: Point,
    pub time: Instant,
}

impl Sample {
    pub fn at(x: f64, y: f64, time: Instant) -> Self {
        Self::new(Point::new(x, y), time)
    }
}

impl gazeswipe_util::Timestamped for Sample {
    fn timestamp(&self) -> Instant {
        self.time
    }
}
