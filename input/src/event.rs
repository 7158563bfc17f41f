use gazeswipe_geometry::Point;

/// Notifications emitted by the recognizer, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GazeEvent {
    /// A new eye position was observed. Emitted for every sample, before any other event.
    EyePositionChanged(Point),
    /// An attempt started (`true`) or ended (`false`).
    TrackingStateChanged(bool),
    /// A gaze swipe was recognized. Always followed by `TrackingStateChanged(false)`.
    GestureDetected,
}

impl GazeEvent {
    pub fn is_gesture(&self) -> bool {
        matches!(self, GazeEvent::GestureDetected)
    }

    /// Returns the new tracking state if this is a tracking state change.
    pub fn tracking_state(&self) -> Option<bool> {
        match *self {
            GazeEvent::TrackingStateChanged(tracking) => Some(tracking),
            _ => None,
        }
    }
}
