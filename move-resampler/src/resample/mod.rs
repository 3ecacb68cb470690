//! Move-event resampling
//!
//! This module turns an irregular stream of raw pointer samples into one
//! smooth position per display refresh:
//! - A windowed history with least-squares interpolation and extrapolation
//! - Per-axis One Euro filtering with a startup ramp

pub mod types;
pub mod history;
pub mod resampler;

pub use types::MoveEvent;
pub use history::EventHistory;
pub use resampler::{MoveResampler, DEFAULT_MAX_EVENT_INTERVAL_US, STARTUP_DURATION_US};
