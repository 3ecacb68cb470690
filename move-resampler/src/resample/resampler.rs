//! Move Resampler
//!
//! Buffers raw pointer samples of a drag gesture and produces a smoothed
//! position at arbitrary query times, typically one per display refresh.
//!
//! Pipeline per query:
//! 1. Startup ramp: blend the filter tuning from a very smooth profile to
//!    the normal one during the first moments of the gesture
//! 2. Raw reconstruction: hold, interpolate or extrapolate from history
//! 3. One Euro filtering per axis, then rounding to device pixels
//!
//! A resampler is owned by a single gesture controller and is not
//! synchronized internally.

use super::history::EventHistory;
use super::types::MoveEvent;
use crate::filter::one_euro::{
    FilterParam, OneEuroFilter, DEFAULT_FILTER_PARAM, STARTUP_FILTER_PARAM,
};
use tracing::{debug, trace};

/// Default retention window for buffered events (60 ms)
pub const DEFAULT_MAX_EVENT_INTERVAL_US: i64 = 60_000;

/// Default length of the startup smoothing ramp (120 ms)
pub const STARTUP_DURATION_US: i64 = 120_000;

/// Startup ramp bookkeeping
#[derive(Debug, Clone)]
struct StartupRamp {
    /// Set by the first push of a gesture so the ramp is armed once
    initialized: bool,
    /// True while filter tuning is still being blended
    active: bool,
    start_time_us: i64,
    /// Zero or negative disables the ramp
    duration_us: i64,
    startup_param: FilterParam,
}

/// Resamples a jittery move-event stream at display refresh times
#[derive(Debug, Clone)]
pub struct MoveResampler {
    history: EventHistory,
    startup: StartupRamp,
    normal_param: FilterParam,
    filter_x: OneEuroFilter,
    filter_y: OneEuroFilter,
}

impl MoveResampler {
    /// Create a resampler.
    ///
    /// - `max_event_interval_us`: maximum age of buffered events
    /// - `startup_duration_us`: length of the startup ramp, 0 disables it
    /// - `startup_param`: filter tuning at the very start of a gesture
    /// - `normal_param`: steady-state filter tuning
    pub fn new(
        max_event_interval_us: i64,
        startup_duration_us: i64,
        startup_param: FilterParam,
        normal_param: FilterParam,
    ) -> Self {
        Self {
            history: EventHistory::new(max_event_interval_us),
            startup: StartupRamp {
                initialized: false,
                active: false,
                start_time_us: 0,
                duration_us: startup_duration_us,
                startup_param,
            },
            normal_param,
            filter_x: OneEuroFilter::new(normal_param),
            filter_y: OneEuroFilter::new(normal_param),
        }
    }

    /// Re-initialize both axis filters when consecutive queries are more
    /// than `gap_us` apart. `None` keeps the plain time-order check only.
    pub fn with_reset_gap(mut self, gap_us: Option<i64>) -> Self {
        self.filter_x = self.filter_x.with_reset_gap(gap_us);
        self.filter_y = self.filter_y.with_reset_gap(gap_us);
        self
    }

    /// Record a raw sample.
    ///
    /// Samples of one gesture must arrive in non-decreasing time order.
    pub fn push_event(&mut self, time_us: i64, pos_x: i32, pos_y: i32) {
        if !self.startup.initialized {
            // Offsets are relative to the drag start, so soft-start from it
            self.begin_startup(time_us, 0.0, 0.0);
        }

        trace!(time_us, pos_x, pos_y, "push move event");
        self.history.push(MoveEvent::new(time_us, pos_x, pos_y));
    }

    /// Smoothed position at `target_time_us`
    pub fn resample_at(&mut self, target_time_us: i64) -> MoveEvent {
        self.apply_startup_smoothing(target_time_us);

        let (raw_x, raw_y) = self.resample_raw(target_time_us);
        let x = self.filter_x.filter(target_time_us, raw_x);
        let y = self.filter_y.filter(target_time_us, raw_y);

        MoveEvent::new(target_time_us, round_to_pixel(x), round_to_pixel(y))
    }

    /// Unfiltered reconstruction at `target_time_us`.
    ///
    /// Evicts stale history relative to the query time, then:
    /// - empty history: last pushed position
    /// - one sample, or at/before the earliest sample: earliest position
    /// - inside the buffered span: interpolation
    /// - at/after the newest sample: extrapolation
    pub fn resample_raw(&mut self, target_time_us: i64) -> (f64, f64) {
        self.history.evict_older_than(target_time_us);

        let (first, last) = match (self.history.front(), self.history.back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return self.history.last_raw().position(),
        };

        if self.history.len() == 1 || target_time_us <= first.time_us {
            return first.position();
        }

        if target_time_us < last.time_us {
            self.history.interpolate(target_time_us)
        } else {
            self.history.extrapolate(target_time_us)
        }
    }

    /// Return to the pre-gesture state
    pub fn reset(&mut self) {
        self.history.clear();
        self.filter_x.reset();
        self.filter_y.reset();
        self.filter_x.set_param(self.normal_param);
        self.filter_y.set_param(self.normal_param);
        self.startup.initialized = false;
        self.startup.active = false;
        self.startup.start_time_us = 0;
        debug!("move resampler reset");
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recent raw sample, retained even after eviction
    pub fn last_raw_event(&self) -> MoveEvent {
        self.history.last_raw()
    }

    /// Whether the startup ramp is still blending filter tuning
    pub fn in_startup(&self) -> bool {
        self.startup.active
    }

    pub fn max_event_interval_us(&self) -> i64 {
        self.history.max_interval_us()
    }

    /// Current tuning of the axis filters
    pub fn current_param(&self) -> FilterParam {
        self.filter_x.param()
    }

    fn begin_startup(&mut self, start_time_us: i64, initial_x: f64, initial_y: f64) {
        self.startup.initialized = true;

        if self.startup.duration_us <= 0 {
            self.startup.active = false;
            self.set_filter_param(self.normal_param);
            return;
        }

        self.startup.active = true;
        self.startup.start_time_us = start_time_us;
        self.set_filter_param(self.startup.startup_param);
        self.filter_x.set_initial_value(initial_x);
        self.filter_y.set_initial_value(initial_y);
        debug!(
            start_time_us,
            duration_us = self.startup.duration_us,
            "move resampler startup ramp armed"
        );
    }

    fn apply_startup_smoothing(&mut self, target_time_us: i64) {
        if !self.startup.active {
            return;
        }

        let elapsed_us = target_time_us.saturating_sub(self.startup.start_time_us);
        if elapsed_us < self.startup.duration_us {
            let t = elapsed_us as f64 / self.startup.duration_us as f64;
            let param = self
                .startup
                .startup_param
                .blend_min_cutoff(&self.normal_param, t);
            self.set_filter_param(param);
        } else {
            self.startup.active = false;
            self.set_filter_param(self.normal_param);
            debug!(elapsed_us, "move resampler startup ramp finished");
        }
    }

    fn set_filter_param(&mut self, param: FilterParam) {
        self.filter_x.set_param(param);
        self.filter_y.set_param(param);
    }
}

impl Default for MoveResampler {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_EVENT_INTERVAL_US,
            STARTUP_DURATION_US,
            STARTUP_FILTER_PARAM,
            DEFAULT_FILTER_PARAM,
        )
    }
}

/// Round half away from zero, saturating at the `i32` range
#[inline]
fn round_to_pixel(value: f64) -> i32 {
    value.round() as i32
}
