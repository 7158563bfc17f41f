//! Recognizes a gaze swipe: the gaze enters the trigger zone at the right screen edge and then
//! moves up while staying inside the zone, all within the attempt timeout.
//!
//! The recognizer is driven by samples only. An open attempt expires lazily when the next sample
//! arrives after the timeout, there is no timer.

use std::{mem, time::Instant};

use gazeswipe_geometry::{Point, UnitInterval};
use log::debug;

use crate::{GazeEvent, GazeObserver, RecognizerConfig, Sample, Trajectory, observer};

#[derive(Debug, Default)]
pub struct GazeSwipeRecognizer {
    config: RecognizerConfig,
    state: RecognizerState,
}

#[derive(Debug, Default)]
pub enum RecognizerState {
    #[default]
    Idle,
    /// An attempt is in progress. The trajectory starts with the sample that entered the zone.
    Tracking(Trajectory),
}

impl GazeSwipeRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            config,
            state: RecognizerState::Idle,
        }
    }

    /// Processes the next sample and returns the events it caused.
    ///
    /// Samples must be fed in non-decreasing timestamp order. The first event is always
    /// [`GazeEvent::EyePositionChanged`].
    pub fn feed(&mut self, sample: Sample) -> Vec<GazeEvent> {
        let mut events = vec![GazeEvent::EyePositionChanged(sample.position)];

        match &mut self.state {
            RecognizerState::Idle => {
                if self.config.in_zone(sample.position) {
                    debug!("Gaze entered the trigger zone at {:?}", sample.position);
                    self.state = RecognizerState::Tracking(Trajectory::new(sample));
                    events.push(GazeEvent::TrackingStateChanged(true));
                }
            }
            RecognizerState::Tracking(trajectory) => {
                let elapsed = sample.time.saturating_duration_since(trajectory.began());
                if elapsed > self.config.attempt_timeout {
                    debug!(
                        "Attempt timed out after {elapsed:?} with {} samples, vertical span {:.3}",
                        trajectory.len(),
                        trajectory.vertical_span()
                    );
                    events.extend(self.reset());
                    return events;
                }

                trajectory.push(sample);

                if trajectory.len() >= self.config.min_samples_for_match
                    && trajectory.matches_swipe(&self.config)
                {
                    debug!(
                        "Gaze swipe detected after {:?}, moved up by {:.3}",
                        trajectory.duration(),
                        trajectory.vertical_movement()
                    );
                    events.push(GazeEvent::GestureDetected);
                    events.extend(self.reset());
                }
            }
        }

        events
    }

    /// Processes the next sample and dispatches the resulting events to `observer`.
    pub fn feed_observed(&mut self, sample: Sample, observer: &mut (impl GazeObserver + ?Sized)) {
        let events = self.feed(sample);
        observer::dispatch(&events, observer);
    }

    /// Abandons the current attempt.
    ///
    /// Returns `TrackingStateChanged(false)` if an attempt was in progress, `None` when already
    /// idle.
    pub fn reset(&mut self) -> Option<GazeEvent> {
        match mem::take(&mut self.state) {
            RecognizerState::Idle => None,
            RecognizerState::Tracking(_) => Some(GazeEvent::TrackingStateChanged(false)),
        }
    }

    /// Replaces the configuration.
    ///
    /// An attempt in progress is kept and judged by the new thresholds from now on.
    pub fn configure(&mut self, config: RecognizerConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn state(&self) -> &RecognizerState {
        &self.state
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, RecognizerState::Tracking(_))
    }

    /// The trajectory of the attempt in progress.
    pub fn attempt(&self) -> Option<&Trajectory> {
        match &self.state {
            RecognizerState::Idle => None,
            RecognizerState::Tracking(trajectory) => Some(trajectory),
        }
    }

    /// How much of the attempt timeout has elapsed at `now`. `None` when idle.
    pub fn attempt_progress(&self, now: Instant) -> Option<UnitInterval> {
        let elapsed = now.saturating_duration_since(self.attempt()?.began());
        Some(UnitInterval::fraction(
            elapsed.as_secs_f64(),
            self.config.attempt_timeout.as_secs_f64(),
        ))
    }

    /// `true` if the position lies inside the trigger zone.
    pub fn in_zone(&self, position: Point) -> bool {
        self.config.in_zone(position)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        time::{Duration, Instant},
    };

    use gazeswipe_geometry::{Point, UnitInterval};

    use super::{GazeSwipeRecognizer, RecognizerState};
    use crate::{Callbacks, GazeEvent, RecognizerConfig, Sample};

    use GazeEvent::*;

    /// Feeds samples given as `(seconds, x, y)` relative to `start` and collects all events.
    fn feed_all(
        recognizer: &mut GazeSwipeRecognizer,
        start: Instant,
        samples: &[(f64, f64, f64)],
    ) -> Vec<GazeEvent> {
        samples
            .iter()
            .flat_map(|&(t, x, y)| recognizer.feed(sample(start, t, x, y)))
            .collect()
    }

    fn sample(start: Instant, t: f64, x: f64, y: f64) -> Sample {
        Sample::at(x, y, start + Duration::from_secs_f64(t))
    }

    fn gestures(events: &[GazeEvent]) -> usize {
        events.iter().filter(|e| e.is_gesture()).count()
    }

    const SWIPE: [(f64, f64, f64); 5] = [
        (0.0, 0.96, 0.50),
        (0.1, 0.97, 0.45),
        (0.2, 0.97, 0.40),
        (0.3, 0.96, 0.32),
        (0.4, 0.97, 0.28),
    ];

    #[test]
    fn reset_when_idle_is_silent() {
        let mut recognizer = GazeSwipeRecognizer::default();
        assert_eq!(recognizer.reset(), None);
        assert_eq!(recognizer.reset(), None);
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn reset_while_tracking_ends_the_attempt() {
        let mut recognizer = GazeSwipeRecognizer::default();
        recognizer.feed(sample(Instant::now(), 0.0, 0.96, 0.5));
        assert!(recognizer.is_tracking());
        assert_eq!(recognizer.reset(), Some(TrackingStateChanged(false)));
        assert!(!recognizer.is_tracking());
        assert_eq!(recognizer.reset(), None);
    }

    #[test]
    fn zone_entry_starts_tracking() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let events = recognizer.feed(sample(Instant::now(), 0.0, 0.96, 0.5));
        assert_eq!(
            events,
            [
                EyePositionChanged(Point::new(0.96, 0.5)),
                TrackingStateChanged(true)
            ]
        );
        assert!(recognizer.is_tracking());
        assert!(matches!(
            recognizer.state(),
            RecognizerState::Tracking(trajectory) if trajectory.len() == 1
        ));
        assert_eq!(recognizer.attempt().unwrap().len(), 1);
    }

    #[test]
    fn samples_outside_the_zone_never_start_tracking() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let events = feed_all(
            &mut recognizer,
            Instant::now(),
            &[
                (0.0, 0.10, 0.5),
                (0.1, 0.50, 0.4),
                (0.2, 0.95, 0.3),
                (0.3, 0.95, 0.1),
                (0.4, -0.2, 1.3),
            ],
        );
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| matches!(e, EyePositionChanged(_))));
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn timeout_abandons_attempt() {
        let start = Instant::now();
        let mut recognizer = GazeSwipeRecognizer::default();
        recognizer.feed(sample(start, 0.0, 0.96, 0.5));

        let events = recognizer.feed(sample(start, 1.2, 0.5, 0.5));
        assert_eq!(
            events,
            [
                EyePositionChanged(Point::new(0.5, 0.5)),
                TrackingStateChanged(false)
            ]
        );
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn timeout_is_checked_before_matching() {
        let start = Instant::now();
        let mut recognizer = GazeSwipeRecognizer::default();
        let events = feed_all(
            &mut recognizer,
            start,
            &[
                (0.0, 0.96, 0.50),
                (0.1, 0.97, 0.45),
                (0.2, 0.97, 0.40),
                (0.3, 0.96, 0.32),
                // Would match, but arrives too late.
                (1.5, 0.97, 0.10),
            ],
        );
        assert_eq!(gestures(&events), 0);
        assert_eq!(events.last(), Some(&TrackingStateChanged(false)));
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn sample_exactly_at_timeout_still_counts() {
        let start = Instant::now();
        let mut recognizer = GazeSwipeRecognizer::new(RecognizerConfig {
            min_samples_for_match: 2,
            ..Default::default()
        });
        let events = feed_all(&mut recognizer, start, &[(0.0, 0.96, 0.5), (1.0, 0.97, 0.2)]);
        assert_eq!(gestures(&events), 1);
    }

    #[test]
    fn swipe_is_detected() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();

        let events = feed_all(&mut recognizer, start, &SWIPE[..4]);
        assert_eq!(gestures(&events), 0);
        assert!(recognizer.is_tracking());

        let (t, x, y) = SWIPE[4];
        let events = recognizer.feed(sample(start, t, x, y));
        assert_eq!(
            events,
            [
                EyePositionChanged(Point::new(0.97, 0.28)),
                GestureDetected,
                TrackingStateChanged(false)
            ]
        );
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn swipe_is_delivered_to_observers() {
        let log = RefCell::new(Vec::new());
        let mut callbacks = Callbacks::default()
            .on_eye_position(|p| log.borrow_mut().push(format!("position {} {}", p.x, p.y)))
            .on_tracking_state(|t| log.borrow_mut().push(format!("tracking {t}")))
            .on_gesture(|| log.borrow_mut().push("gesture".into()));

        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();
        for &(t, x, y) in &SWIPE {
            recognizer.feed_observed(sample(start, t, x, y), &mut callbacks);
        }
        drop(callbacks);

        assert_eq!(
            log.into_inner(),
            [
                "position 0.96 0.5",
                "tracking true",
                "position 0.97 0.45",
                "position 0.97 0.4",
                "position 0.96 0.32",
                "position 0.97 0.28",
                "gesture",
                "tracking false",
            ]
        );
        assert!(matches!(recognizer.state(), RecognizerState::Idle));
    }

    #[test]
    fn near_miss_keeps_accumulating_until_timeout() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();
        let mut near_miss = SWIPE;
        near_miss[4].2 = 0.35;

        let events = feed_all(&mut recognizer, start, &near_miss);
        assert_eq!(gestures(&events), 0);
        assert!(recognizer.is_tracking());

        feed_all(&mut recognizer, start, &[(0.5, 0.97, 0.36), (0.6, 0.97, 0.34)]);
        assert_eq!(recognizer.attempt().unwrap().len(), 7);

        let events = feed_all(&mut recognizer, start, &[(1.1, 0.97, 0.35)]);
        assert_eq!(events.last(), Some(&TrackingStateChanged(false)));
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn drifting_away_from_the_edge_fails() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let mut drift = SWIPE;
        drift[4] = (0.4, 0.80, 0.20);

        let events = feed_all(&mut recognizer, Instant::now(), &drift);
        assert_eq!(gestures(&events), 0);
        // Leaving the zone does not end the attempt.
        assert!(recognizer.is_tracking());
    }

    #[test]
    fn late_match_after_near_misses() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let mut samples = SWIPE.to_vec();
        samples[4].2 = 0.35;
        samples.push((0.5, 0.97, 0.25));

        let events = feed_all(&mut recognizer, Instant::now(), &samples);
        assert_eq!(gestures(&events), 1);
    }

    #[test]
    fn no_double_fire() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();
        feed_all(&mut recognizer, start, &SWIPE);
        assert!(!recognizer.is_tracking());

        // The next sample starts a fresh attempt and can't complete the old one.
        let events = recognizer.feed(sample(start, 0.5, 0.97, 0.20));
        assert_eq!(
            events,
            [
                EyePositionChanged(Point::new(0.97, 0.20)),
                TrackingStateChanged(true)
            ]
        );
        assert_eq!(recognizer.attempt().unwrap().len(), 1);
    }

    #[test]
    fn reentering_the_zone_continues_the_attempt() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();
        let events = feed_all(
            &mut recognizer,
            start,
            &[(0.0, 0.96, 0.5), (0.3, 0.80, 0.5), (0.6, 0.96, 0.5)],
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| e.tracking_state() == Some(true))
                .count(),
            1
        );
        let attempt = recognizer.attempt().unwrap();
        assert_eq!(attempt.len(), 3);
        assert_eq!(attempt.began(), start);
    }

    #[test]
    fn position_event_always_comes_first() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();
        for &(t, x, y) in &SWIPE {
            let events = recognizer.feed(sample(start, t, x, y));
            assert_eq!(events[0], EyePositionChanged(Point::new(x, y)));
        }
    }

    #[test]
    fn configure_keeps_the_attempt() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();
        feed_all(&mut recognizer, start, &SWIPE[..2]);

        recognizer.configure(RecognizerConfig {
            min_samples_for_match: 3,
            vertical_threshold: 0.05,
            ..Default::default()
        });
        assert!(recognizer.is_tracking());

        let events = feed_all(&mut recognizer, start, &SWIPE[2..3]);
        assert_eq!(gestures(&events), 1);
    }

    #[test]
    fn attempt_progress() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();
        assert_eq!(recognizer.attempt_progress(start), None);

        recognizer.feed(sample(start, 0.0, 0.96, 0.5));
        assert_eq!(
            recognizer.attempt_progress(start + Duration::from_millis(250)),
            Some(UnitInterval::new(0.25))
        );
        assert_eq!(
            recognizer.attempt_progress(start + Duration::from_secs(3)),
            Some(UnitInterval::ONE)
        );
    }

    #[test]
    fn stalled_stream_keeps_the_attempt_open() {
        let mut recognizer = GazeSwipeRecognizer::default();
        let start = Instant::now();
        recognizer.feed(sample(start, 0.0, 0.96, 0.5));
        // Without further samples, nothing expires the attempt.
        assert!(recognizer.is_tracking());
        assert_eq!(
            recognizer.attempt_progress(start + Duration::from_secs(10)),
            Some(UnitInterval::ONE)
        );
        assert!(recognizer.is_tracking());
    }
}
