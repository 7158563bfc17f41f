//! Recorded eye position traces.
//!
//! A trace is a JSON lines file with one sample per line:
//!
//! ```text
//! {"t": 0.0, "position": [0.96, 0.50]}
//! {"t": 0.1, "position": [0.97, 0.45]}
//! ```
//!
//! `t` is in seconds relative to the start of the replay. Empty lines and lines starting with `#`
//! are skipped.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use gazeswipe_geometry::Point;
use gazeswipe_input::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub t: f64,
    pub position: Point,
}

impl TraceRecord {
    pub fn new(t: f64, position: Point) -> Self {
        Self { t, position }
    }

    /// Time since the start of the trace.
    pub fn offset(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.t).with_context(|| {
            format!(
                "Time must be a non-negative number of seconds, was: {}",
                self.t
            )
        })
    }

    pub fn to_sample(&self, base: Instant) -> Result<Sample> {
        let time = base
            .checked_add(self.offset()?)
            .with_context(|| format!("Time {} lies too far in the future", self.t))?;
        Ok(Sample::new(self.position, time))
    }
}

pub fn load(path: &Path) -> Result<Vec<TraceRecord>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open trace {}", path.display()))?;
    parse(BufReader::new(file)).with_context(|| format!("In trace {}", path.display()))
}

pub fn parse(reader: impl BufRead) -> Result<Vec<TraceRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(line)
            .with_context(|| format!("Line {line_number}: Invalid trace record"))?;
        record
            .offset()
            .with_context(|| format!("Line {line_number}: Invalid time"))?;
        records.push(record);
    }
    Ok(records)
}

/// Generates the path of the calibration dot: it rests at the vertical center for a second and
/// then sweeps up to the top of the screen, followed by another rest.
///
/// `rate` is in samples per second.
pub fn calibration_sweep(edge_x: f64, rate: f64, sweep: Duration) -> Result<Vec<TraceRecord>> {
    const REST: f64 = 1.0;
    const FROM_Y: f64 = 0.5;
    const TO_Y: f64 = 0.1;

    const MAX_SAMPLES: f64 = 1_000_000.0;

    if !rate.is_finite() || rate <= 0.0 {
        bail!("Sample rate must be positive, was: {rate}");
    }

    let sweep = sweep.as_secs_f64();
    let total = REST + sweep + REST;
    let samples = (total * rate).floor();
    if samples >= MAX_SAMPLES {
        bail!("A sweep of {total}s at {rate} samples per second is too long");
    }
    let count = samples as usize + 1;

    Ok((0..count)
        .map(|i| {
            let t = i as f64 / rate;
            let progress = if sweep > 0.0 {
                ((t - REST) / sweep).clamp(0.0, 1.0)
            } else if t >= REST {
                1.0
            } else {
                0.0
            };
            let y = FROM_Y + (TO_Y - FROM_Y) * smoothstep(progress);
            TraceRecord::new(t, Point::new(edge_x, y))
        })
        .collect())
}

/// Ease in and out.
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
