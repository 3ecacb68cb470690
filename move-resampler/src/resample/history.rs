//! Windowed event history
//!
//! Keeps the last few raw samples of a gesture, bounded by a retention
//! window, and reconstructs positions from them:
//! - interpolation between two least-squares-refined bracket points
//! - extrapolation along a least-squares line through the newest samples
//!
//! All lookups assume the buffered events are in non-decreasing time order.
//! That holds because [`EventHistory::push`] only appends and callers feed
//! samples of one gesture in time order.

use super::types::MoveEvent;
use std::collections::VecDeque;

/// Samples used to refine the earlier bracket point during interpolation
const INTERP_PREV_FIT_SAMPLES: usize = 4;

/// Samples used to refine the later bracket point during interpolation
const INTERP_NEXT_FIT_SAMPLES: usize = 3;

/// Samples used for extrapolation
const EXTRAP_FIT_SAMPLES: usize = 5;

/// Denominators below this are treated as a degenerate (zero) time spread
const MIN_FIT_DENOMINATOR: f64 = 1e-12;

/// Time-ordered buffer of raw move events
#[derive(Debug, Clone)]
pub struct EventHistory {
    events: VecDeque<MoveEvent>,
    /// Most recent pushed event, kept after the window empties so that an
    /// idle pointer holds its true last position
    last_raw: MoveEvent,
    /// Retention window (µs)
    max_interval_us: i64,
}

impl EventHistory {
    pub fn new(max_interval_us: i64) -> Self {
        Self {
            events: VecDeque::new(),
            last_raw: MoveEvent::default(),
            max_interval_us,
        }
    }

    /// Append an event and drop everything older than the retention window
    pub fn push(&mut self, event: MoveEvent) {
        self.last_raw = event;
        self.events.push_back(event);
        self.evict_older_than(event.time_us);
    }

    /// Drop events with `time_us < current_time_us - max_interval_us`
    pub fn evict_older_than(&mut self, current_time_us: i64) {
        let cutoff = current_time_us.saturating_sub(self.max_interval_us);
        while self
            .events
            .front()
            .is_some_and(|front| front.time_us < cutoff)
        {
            self.events.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.last_raw = MoveEvent::default();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn front(&self) -> Option<&MoveEvent> {
        self.events.front()
    }

    pub fn back(&self) -> Option<&MoveEvent> {
        self.events.back()
    }

    pub fn last_raw(&self) -> MoveEvent {
        self.last_raw
    }

    pub fn max_interval_us(&self) -> i64 {
        self.max_interval_us
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveEvent> {
        self.events.iter()
    }

    /// Index of the first event with `time_us >= target_time_us`, searched
    /// over `1..len`. Index 0 can never be the later point of a segment.
    ///
    /// Requires at least two buffered events.
    pub fn find_segment_index(&self, target_time_us: i64) -> usize {
        let last = self.events.len().saturating_sub(1);
        self.events
            .partition_point(|e| e.time_us < target_time_us)
            .clamp(1, last.max(1))
    }

    /// Interpolate at a time strictly inside the buffered span.
    ///
    /// Both bracket points are replaced by a local line fit before the
    /// linear blend to suppress per-sample noise.
    pub fn interpolate(&self, target_time_us: i64) -> (f64, f64) {
        if self.events.len() < 2 {
            return self.newest_position();
        }

        let next_idx = self.find_segment_index(target_time_us);
        let prev_idx = next_idx - 1;
        let prev = self.events[prev_idx];
        let next = self.events[next_idx];

        let span = next.time_us - prev.time_us;
        if span == 0 {
            return next.position();
        }

        let (prev_x, prev_y) = self.linear_fit_at(
            prev_idx.saturating_sub(INTERP_PREV_FIT_SAMPLES - 1),
            prev_idx,
            prev.time_us,
        );
        let (next_x, next_y) = self.linear_fit_at(
            next_idx.saturating_sub(INTERP_NEXT_FIT_SAMPLES - 1),
            next_idx,
            next.time_us,
        );

        let ratio = (target_time_us - prev.time_us) as f64 / span as f64;
        (
            prev_x + (next_x - prev_x) * ratio,
            prev_y + (next_y - prev_y) * ratio,
        )
    }

    /// Extrapolate along a least-squares line through the newest samples
    pub fn extrapolate(&self, target_time_us: i64) -> (f64, f64) {
        if self.events.is_empty() {
            return self.last_raw.position();
        }
        let end = self.events.len() - 1;
        let start = self.events.len().saturating_sub(EXTRAP_FIT_SAMPLES);
        self.linear_fit_at(start, end, target_time_us)
    }

    /// Fit one line per axis through events `start..=end` and evaluate it at
    /// `target_time_us`.
    ///
    /// Times are centered on their mean before fitting; raw microsecond
    /// timestamps are too large relative to their spread for a stable slope.
    pub fn linear_fit_at(&self, start: usize, end: usize, target_time_us: i64) -> (f64, f64) {
        if self.events.is_empty() {
            return self.last_raw.position();
        }
        if start > end || end >= self.events.len() {
            return self.newest_position();
        }

        // Offsets from the first sample keep the sums small before centering
        let base_us = self.events[start].time_us;
        let count = (end - start + 1) as f64;

        let (sum_t, sum_x, sum_y) = self
            .events
            .range(start..=end)
            .fold((0.0, 0.0, 0.0), |(t, x, y), e| {
                (
                    t + (e.time_us - base_us) as f64,
                    x + e.pos_x as f64,
                    y + e.pos_y as f64,
                )
            });
        let mean_t = sum_t / count;
        let mean_x = sum_x / count;
        let mean_y = sum_y / count;

        let (num_x, num_y, denom) =
            self.events
                .range(start..=end)
                .fold((0.0, 0.0, 0.0), |(nx, ny, d), e| {
                    let dt = (e.time_us - base_us) as f64 - mean_t;
                    (
                        nx + dt * (e.pos_x as f64 - mean_x),
                        ny + dt * (e.pos_y as f64 - mean_y),
                        d + dt * dt,
                    )
                });

        // All samples share one timestamp: the mean is the best estimate
        let (slope_x, slope_y) = if denom.abs() < MIN_FIT_DENOMINATOR {
            (0.0, 0.0)
        } else {
            (num_x / denom, num_y / denom)
        };

        let offset = (target_time_us - base_us) as f64 - mean_t;
        (mean_x + slope_x * offset, mean_y + slope_y * offset)
    }

    fn newest_position(&self) -> (f64, f64) {
        self.events
            .back()
            .map(MoveEvent::position)
            .unwrap_or_else(|| self.last_raw.position())
    }
}
