//! Gaze swipe recognition over a stream of normalized eye position samples.
mod config;
mod estimate;
mod event;
pub mod observer;
mod recognizer;
mod sample;
mod session;
mod trajectory;

pub use config::*;
pub use estimate::*;
pub use event::*;
pub use observer::{Callbacks, GazeObserver};
pub use recognizer::*;
pub use sample::*;
pub use session::*;
pub use trajectory::*;
