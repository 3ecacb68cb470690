//! Offline Replay
//!
//! Feeds a recorded trace through a resampler on a simulated vsync clock,
//! interleaving samples and refresh ticks the way they would arrive live.

use super::trace::MoveTrace;
use crate::resample::{MoveEvent, MoveResampler};
use crate::time::vsync::VsyncClock;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Resampler output for one vsync tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub vsync_time_us: i64,
    /// Unfiltered reconstruction at the tick
    pub raw_x: f64,
    pub raw_y: f64,
    /// Filtered, rounded output
    pub output: MoveEvent,
}

/// Summary of a replay run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayStats {
    pub sample_count: usize,
    pub frame_count: usize,
    /// Largest output jump between consecutive frames (px)
    pub max_step_px: f64,
    /// Mean distance between filtered output and raw reconstruction (px)
    pub mean_lag_px: f64,
}

/// Frames and stats from a replay run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayReport {
    pub frames: Vec<ReplayFrame>,
    pub stats: ReplayStats,
}

impl ReplayReport {
    /// Output positions only
    pub fn outputs(&self) -> impl Iterator<Item = &MoveEvent> {
        self.frames.iter().map(|f| &f.output)
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Replay `trace` through `resampler`.
///
/// The resampler is reset first. Ticks run from the first tick at or after
/// the first sample through `last sample + tail_us`; before each tick every
/// sample with `time_us <= tick` is pushed.
pub fn replay(
    trace: &MoveTrace,
    resampler: &mut MoveResampler,
    clock: &VsyncClock,
    tail_us: i64,
) -> crate::Result<ReplayReport> {
    if !trace.is_sorted() {
        return Err(Error::Trace(format!(
            "samples of trace '{}' are not in time order",
            trace.metadata.name
        )));
    }

    resampler.reset();

    let (first, last) = match (trace.samples.first(), trace.samples.last()) {
        (Some(first), Some(last)) => (first.time_us, last.time_us),
        _ => return Ok(ReplayReport::default()),
    };
    let end_us = last.saturating_add(tail_us.max(0));

    let mut frames = Vec::new();
    let mut pending = trace.samples.iter().peekable();

    for tick in clock.ticks(first, end_us) {
        while let Some(sample) = pending.next_if(|s| s.time_us <= tick) {
            resampler.push_event(sample.time_us, sample.pos_x, sample.pos_y);
        }

        let (raw_x, raw_y) = resampler.resample_raw(tick);
        let output = resampler.resample_at(tick);
        frames.push(ReplayFrame {
            vsync_time_us: tick,
            raw_x,
            raw_y,
            output,
        });
    }

    let stats = compute_stats(trace.len(), &frames);
    info!(
        name = %trace.metadata.name,
        frames = stats.frame_count,
        max_step_px = stats.max_step_px,
        "Replay complete"
    );

    Ok(ReplayReport { frames, stats })
}

fn compute_stats(sample_count: usize, frames: &[ReplayFrame]) -> ReplayStats {
    let max_step_px = frames
        .windows(2)
        .map(|w| w[0].output.distance_to(&w[1].output))
        .fold(0.0, f64::max);

    let mean_lag_px = if frames.is_empty() {
        0.0
    } else {
        frames
            .iter()
            .map(|f| {
                let dx = f.output.pos_x as f64 - f.raw_x;
                let dy = f.output.pos_y as f64 - f.raw_y;
                (dx * dx + dy * dy).sqrt()
            })
            .sum::<f64>()
            / frames.len() as f64
    };

    ReplayStats {
        sample_count,
        frame_count: frames.len(),
        max_step_px,
        mean_lag_px,
    }
}
