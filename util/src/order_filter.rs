use std::time::Instant;

/// Something that happened at a specific instant.
pub trait Timestamped {
    fn timestamp(&self) -> Instant;
}

/// The latest timestamp accepted so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Watermark(Option<Instant>);

impl Watermark {
    /// Advances the watermark to `timestamp` and returns `true`, unless `timestamp` is earlier
    /// than the current watermark.
    pub fn advance(&mut self, timestamp: Instant) -> bool {
        if self.0.is_some_and(|w| timestamp < w) {
            return false;
        }
        self.0 = Some(timestamp);
        true
    }

    pub fn get(&self) -> Option<Instant> {
        self.0
    }
}
