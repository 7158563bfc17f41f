//! Observer style delivery of [`GazeEvent`]s.
//!
//! Events are dispatched after the recognizer finished processing a sample, so observers never
//! see intermediate state and can't re-enter it.

use gazeswipe_geometry::Point;

use crate::GazeEvent;

/// Receives gaze events. Every method defaults to doing nothing, so implementors subscribe only
/// to what they need.
pub trait GazeObserver {
    fn eye_position_changed(&mut self, _position: Point) {}
    fn tracking_state_changed(&mut self, _tracking: bool) {}
    fn gesture_detected(&mut self) {}
}

impl GazeEvent {
    pub fn dispatch(&self, observer: &mut (impl GazeObserver + ?Sized)) {
        match *self {
            GazeEvent::EyePositionChanged(position) => observer.eye_position_changed(position),
            GazeEvent::TrackingStateChanged(tracking) => observer.tracking_state_changed(tracking),
            GazeEvent::GestureDetected => observer.gesture_detected(),
        }
    }
}

/// Dispatches all events in order.
pub fn dispatch<'a>(
    events: impl IntoIterator<Item = &'a GazeEvent>,
    observer: &mut (impl GazeObserver + ?Sized),
) {
    for event in events {
        event.dispatch(observer);
    }
}

/// An observer built from optional closures.
#[derive(Default)]
pub struct Callbacks<'a> {
    on_eye_position: Option<Box<dyn FnMut(Point) + 'a>>,
    on_tracking_state: Option<Box<dyn FnMut(bool) + 'a>>,
    on_gesture: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> Callbacks<'a> {
    pub fn on_eye_position(mut self, f: impl FnMut(Point) + 'a) -> Self {
        self.on_eye_position = Some(Box::new(f));
        self
    }

    pub fn on_tracking_state(mut self, f: impl FnMut(bool) + 'a) -> Self {
        self.on_tracking_state = Some(Box::new(f));
        self
    }

    pub fn on_gesture(mut self, f: impl FnMut() + 'a) -> Self {
        self.on_gesture = Some(Box::new(f));
        self
    }
}

impl GazeObserver for Callbacks<'_> {
    fn eye_position_changed(&mut self, position: Point) {
        if let Some(f) = &mut self.on_eye_position {
            f(position)
        }
    }

    fn tracking_state_changed(&mut self, tracking: bool) {
        if let Some(f) = &mut self.on_tracking_state {
            f(tracking)
        }
    }

    fn gesture_detected(&mut self) {
        if let Some(f) = &mut self.on_gesture {
            f()
        }
    }
}
