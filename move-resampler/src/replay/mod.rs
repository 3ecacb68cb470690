//! Trace capture and offline replay
//!
//! Recorded drag gestures are stored as JSON traces and can be replayed
//! through a resampler on a simulated vsync clock for tuning and
//! regression checks.

pub mod trace;
pub mod engine;

pub use trace::{MoveTrace, TraceMetadata};
pub use engine::{replay, ReplayFrame, ReplayReport, ReplayStats};
