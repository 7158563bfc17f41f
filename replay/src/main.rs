//! Replays eye position traces through the gaze swipe recognizer.
//!
//! ```text
//! RUST_LOG=debug gazeswipe-replay trace.jsonl --config gazeswipe.toml
//! RUST_LOG=info gazeswipe-replay --calibration-sweep --edge-x 0.97
//! ```

mod config_file;
mod player;
mod trace;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use clap::Parser;

use config_file::ConfigFile;

#[derive(Parser, Debug)]
#[command(about = "Replays eye position traces through the gaze swipe recognizer")]
struct Args {
    /// JSON lines trace, one `{"t": seconds, "position": [x, y]}` object per line.
    trace: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replay the calibration dot path instead of a trace file.
    #[arg(long, conflicts_with = "trace")]
    calibration_sweep: bool,

    /// Horizontal position of the calibration dot.
    #[arg(long, default_value_t = 0.95)]
    edge_x: f64,

    /// Seconds the calibration dot takes to move up.
    #[arg(long, default_value_t = 0.5)]
    sweep_secs: f64,

    /// Samples per second of the calibration sweep.
    #[arg(long, default_value_t = 30.0)]
    rate: f64,

    /// Replay in real time instead of as fast as possible.
    #[arg(long)]
    realtime: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    }
    .into_replay_config()?;

    let records = match (&args.trace, args.calibration_sweep) {
        (Some(path), _) => trace::load(path)?,
        (None, true) => {
            let sweep = Duration::try_from_secs_f64(args.sweep_secs).with_context(|| {
                format!("Sweep duration must be non-negative, was: {}", args.sweep_secs)
            })?;
            trace::calibration_sweep(args.edge_x, args.rate, sweep)?
        }
        (None, false) => bail!("Either a trace file or --calibration-sweep is required"),
    };

    let summary = player::play(records, config, args.realtime).await?;
    println!("{summary}");
    Ok(())
}
