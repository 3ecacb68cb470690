//! One Euro Filter
//!
//! Adaptive first-order low-pass filter for a single coordinate axis. The
//! cutoff frequency rises with the estimated speed of the signal, so a slow
//! or resting pointer is smoothed heavily while a fast drag keeps up with the
//! finger.
//!
//! Non-increasing timestamps are not an error: the filter re-initializes and
//! passes the new value through unchanged.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Lower bound on the elapsed time between two samples (seconds)
const MIN_ELAPSED_SECS: f64 = 1e-4;

/// Lower bound on cutoff and elapsed time inside the alpha computation
const MIN_ALPHA_INPUT: f64 = 1e-6;

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Tuning triple for [`OneEuroFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParam {
    /// Baseline cutoff (Hz) used when the signal is nearly static.
    /// Larger values reduce smoothing, smaller values increase it.
    pub min_cutoff: f64,
    /// How much the cutoff grows with speed. Higher beta follows fast
    /// motion more closely at the cost of more residual jitter.
    pub beta: f64,
    /// Cutoff (Hz) used to smooth the derivative estimate itself
    pub d_cutoff: f64,
}

/// Recommended parameters for steady-state dragging
pub const DEFAULT_FILTER_PARAM: FilterParam = FilterParam::new(0.8, 0.005, 1.0);

/// Parameters for the first moments of a gesture (smoother but laggier)
pub const STARTUP_FILTER_PARAM: FilterParam = FilterParam::new(0.1, 0.005, 1.0);

impl FilterParam {
    pub const fn new(min_cutoff: f64, beta: f64, d_cutoff: f64) -> Self {
        Self {
            min_cutoff,
            beta,
            d_cutoff,
        }
    }

    /// All three values must be finite and strictly positive
    pub fn is_valid(&self) -> bool {
        [self.min_cutoff, self.beta, self.d_cutoff]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Blend `min_cutoff` from `self` toward `target` by `t` in `[0, 1]`.
    ///
    /// `beta` and `d_cutoff` are taken from `target` unchanged; only the
    /// baseline smoothness ramps.
    pub fn blend_min_cutoff(&self, target: &FilterParam, t: f64) -> FilterParam {
        let t = t.clamp(0.0, 1.0);
        FilterParam {
            min_cutoff: self.min_cutoff * (1.0 - t) + target.min_cutoff * t,
            beta: target.beta,
            d_cutoff: target.d_cutoff,
        }
    }
}

impl Default for FilterParam {
    fn default() -> Self {
        DEFAULT_FILTER_PARAM
    }
}

/// State carried from one sample to the next
#[derive(Debug, Clone, Copy)]
struct FilterState {
    time_us: i64,
    value: f64,
    derivative: f64,
}

/// Stateful One Euro filter for one axis
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    param: FilterParam,
    /// `None` until the first sample has been seen
    state: Option<FilterState>,
    /// One-shot soft-start baseline, consumed by the next initialization
    initial_value: Option<f64>,
    /// Re-initialize when two samples are further apart than this (µs)
    reset_gap_us: Option<i64>,
}

impl OneEuroFilter {
    pub fn new(param: FilterParam) -> Self {
        Self {
            param,
            state: None,
            initial_value: None,
            reset_gap_us: None,
        }
    }

    /// Also re-initialize when the gap since the previous sample exceeds
    /// `gap_us`. `None` disables the gap check.
    pub fn with_reset_gap(mut self, gap_us: Option<i64>) -> Self {
        self.reset_gap_us = gap_us;
        self
    }

    /// Filter one sample and return the smoothed value.
    ///
    /// `cur_time_us` must be strictly greater than the previous call's time
    /// for smoothing to apply; otherwise the filter restarts from
    /// `cur_value`.
    pub fn filter(&mut self, cur_time_us: i64, cur_value: f64) -> f64 {
        let prev = match self.state {
            Some(prev) if !self.needs_reinit(&prev, cur_time_us) => prev,
            _ => return self.initialize(cur_time_us, cur_value),
        };

        let dt = (cur_time_us.saturating_sub(prev.time_us) as f64 / MICROS_PER_SEC)
            .max(MIN_ELAPSED_SECS);

        // Velocity estimate, itself low-passed
        let raw_derivative = (cur_value - prev.value) / dt;
        let derivative = lowpass(
            prev.derivative,
            raw_derivative,
            alpha(self.param.d_cutoff, dt),
        );

        // Faster motion raises the cutoff and shortens the lag
        let cutoff = self.param.min_cutoff + self.param.beta * derivative.abs();
        let value = lowpass(prev.value, cur_value, alpha(cutoff, dt));

        self.state = Some(FilterState {
            time_us: cur_time_us,
            value,
            derivative,
        });

        value
    }

    /// Replace the tuning used by subsequent calls. State is untouched.
    pub fn set_param(&mut self, param: FilterParam) {
        self.param = param;
    }

    pub fn param(&self) -> FilterParam {
        self.param
    }

    /// Arm a baseline returned by the first initialization instead of the
    /// incoming sample.
    ///
    /// Ignored once the filter has seen a sample: later re-initializations
    /// always pass the incoming value through.
    pub fn set_initial_value(&mut self, initial_value: f64) {
        if self.state.is_none() {
            self.initial_value = Some(initial_value);
        }
    }

    /// Forget all history and any armed baseline
    pub fn reset(&mut self) {
        self.state = None;
        self.initial_value = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn needs_reinit(&self, prev: &FilterState, cur_time_us: i64) -> bool {
        if cur_time_us <= prev.time_us {
            return true;
        }
        matches!(self.reset_gap_us, Some(gap) if cur_time_us.saturating_sub(prev.time_us) > gap)
    }

    fn initialize(&mut self, cur_time_us: i64, cur_value: f64) -> f64 {
        let value = self.initial_value.take().unwrap_or(cur_value);
        self.state = Some(FilterState {
            time_us: cur_time_us,
            value,
            derivative: 0.0,
        });
        value
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FILTER_PARAM)
    }
}

/// Smoothing factor for a first-order low-pass with the given cutoff (Hz)
/// and sample interval (seconds).
fn alpha(cutoff: f64, dt: f64) -> f64 {
    let cutoff = cutoff.max(MIN_ALPHA_INPUT);
    let dt = dt.max(MIN_ALPHA_INPUT);
    let tau = 1.0 / (2.0 * PI * cutoff);
    1.0 / (1.0 + tau / dt)
}

#[inline]
fn lowpass(prev: f64, curr: f64, alpha: f64) -> f64 {
    let alpha = alpha.clamp(0.0, 1.0);
    alpha * curr + (1.0 - alpha) * prev
}
