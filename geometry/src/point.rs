use std::ops::{Add, Div};

use serde_tuple::{Deserialize_tuple, Serialize_tuple};

/// A position in normalized screen space.
///
/// Serializes as a `[x, y]` tuple.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize_tuple, Deserialize_tuple)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The arithmetic mean of all points, `None` if there are none.
    pub fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
        let (sum, count) = points
            .into_iter()
            .fold((Point::default(), 0usize), |(sum, count), p| {
                (sum + p, count + 1)
            });
        (count != 0).then(|| sum / count as f64)
    }

    /// The midpoint between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        (self + other) / 2.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}
