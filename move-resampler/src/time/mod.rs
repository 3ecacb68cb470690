//! Refresh timing
//!
//! All times are signed microseconds on the input device's clock. This
//! module provides the vsync tick source that stands in for the display
//! scheduler during offline replay.

pub mod vsync;

pub use vsync::{micros_to_secs, VsyncClock};
