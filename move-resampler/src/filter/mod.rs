//! Signal smoothing
//!
//! Per-axis adaptive low-pass filtering applied to resampled positions.

pub mod one_euro;

pub use one_euro::{FilterParam, OneEuroFilter, DEFAULT_FILTER_PARAM, STARTUP_FILTER_PARAM};
