//! Plays a trace through a gaze session.
//!
//! Samples are produced on a separate thread and handed over to the consumer through an ordered
//! channel, the way a camera pipeline hands its estimates to the thread that owns the recognizer.

use std::{
    fmt, thread,
    time::{Duration, Instant},
};

use anyhow::{Result, anyhow};
use log::{debug, info, trace, warn};

use gazeswipe_geometry::Point;
use gazeswipe_input::{GazeObserver, GazeSession, observer};
use gazeswipe_util::ordered_channel;

use crate::{config_file::ReplayConfig, trace::TraceRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub samples: usize,
    pub dropped: usize,
    pub attempts: u64,
    pub gestures: u64,
    pub silences: usize,
    pub longest_gap: Duration,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "samples: {}, dropped: {}, attempts: {}, gestures: {}, silences: {}, longest gap: {:?}",
            self.samples,
            self.dropped,
            self.attempts,
            self.gestures,
            self.silences,
            self.longest_gap
        )
    }
}

/// Logs the events a session emits.
#[derive(Debug, Default)]
struct EventLogger {
    tracking_since: Option<Point>,
    last_position: Point,
}

impl GazeObserver for EventLogger {
    fn eye_position_changed(&mut self, position: Point) {
        trace!("Eye position {:.3}, {:.3}", position.x, position.y);
        self.last_position = position;
    }

    fn tracking_state_changed(&mut self, tracking: bool) {
        if tracking {
            debug!("Attempt started at {:?}", self.last_position);
            self.tracking_since = Some(self.last_position);
        } else if let Some(from) = self.tracking_since.take() {
            debug!("Attempt ended, from {from:?} to {:?}", self.last_position);
        }
    }

    fn gesture_detected(&mut self) {
        info!("Gesture detected at {:?}", self.last_position);
    }
}

/// Replays the records and returns what happened.
///
/// With `realtime`, the producer waits until each sample is due, otherwise the trace is played as
/// fast as possible. Sample timestamps are the same in both cases.
pub async fn play(
    records: Vec<TraceRecord>,
    config: ReplayConfig,
    realtime: bool,
) -> Result<Summary> {
    let base = Instant::now();
    let samples = records
        .iter()
        .map(|record| record.to_sample(base))
        .collect::<Result<Vec<_>>>()?;
    let (sender, mut receiver) = ordered_channel();

    let producer = thread::spawn(move || -> Result<()> {
        for sample in samples {
            if realtime {
                thread::sleep(sample.time.saturating_duration_since(Instant::now()));
            }
            sender
                .send(sample)
                .map_err(|_| anyhow!("Sample receiver disconnected"))?;
        }
        Ok(())
    });

    let mut session = GazeSession::new(config.recognizer);
    let mut logger = EventLogger::default();
    let mut summary = Summary::default();
    let mut previous: Option<Instant> = None;

    while let Ok(sample) = receiver.recv().await {
        if let Some(previous) = previous {
            summary.longest_gap = summary
                .longest_gap
                .max(sample.time.saturating_duration_since(previous));
        }
        if session.is_source_silent(sample.time, config.max_source_silence) {
            warn!(
                "No samples for {:?}",
                session.source_silence(sample.time).unwrap_or_default()
            );
            summary.silences += 1;
        }
        previous = Some(sample.time);

        let events = session.feed(sample);
        observer::dispatch(&events, &mut logger);
        summary.samples += 1;
    }

    producer
        .join()
        .map_err(|_| anyhow!("Sample producer panicked"))??;

    summary.dropped = receiver.dropped();
    summary.attempts = session.attempts();
    summary.gestures = session.successful_gestures();
    Ok(summary)
}
