//! Move event type shared by the resampler, router and replay tooling

use serde::{Deserialize, Serialize};
use std::fmt;

/// A timestamped pointer position in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MoveEvent {
    /// Timestamp in microseconds. Non-decreasing within one gesture.
    pub time_us: i64,
    pub pos_x: i32,
    pub pos_y: i32,
}

impl MoveEvent {
    pub const fn new(time_us: i64, pos_x: i32, pos_y: i32) -> Self {
        Self {
            time_us,
            pos_x,
            pos_y,
        }
    }

    /// Position as floating point, for fitting and filtering
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.pos_x as f64, self.pos_y as f64)
    }

    /// Euclidean distance between the positions of two events
    pub fn distance_to(&self, other: &MoveEvent) -> f64 {
        let dx = (other.pos_x as f64) - (self.pos_x as f64);
        let dy = (other.pos_y as f64) - (self.pos_y as f64);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for MoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}, {}]", self.time_us, self.pos_x, self.pos_y)
    }
}
