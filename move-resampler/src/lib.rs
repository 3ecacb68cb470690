//! # Move Resampler
//!
//! Vsync-aligned resampling of window drag move events. Raw touch samples
//! arrive at the input device's rate with jitter in both time and
//! position; window layout wants exactly one smooth position per display
//! refresh. This crate bridges the two.
//!
//! ## Quick Start
//!
//! ```
//! use move_resampler::MoveResampler;
//!
//! let mut resampler = MoveResampler::default();
//!
//! // Raw samples: (time in µs, x, y) as offsets from the drag start
//! resampler.push_event(0, 0, 0);
//! resampler.push_event(8_000, 4, 2);
//! resampler.push_event(16_000, 8, 4);
//!
//! // One query per vsync
//! let sample = resampler.resample_at(20_000);
//! assert_eq!(sample.time_us, 20_000);
//! ```
//!
//! ## Architecture
//!
//! - [`filter`]: One Euro adaptive low-pass filter
//! - [`resample`]: Windowed event history and the resampler
//! - [`routing`]: Per-event decision between resampled and direct updates
//! - [`time`]: Vsync tick source
//! - [`replay`]: Trace format and offline replay
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Pointer   │───▶│   Router    │───▶│   History   │───▶│ Interpolate │
//! │  dispatch   │    │ (touch/move)│    │  (window)   │    │ Extrapolate │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//!                    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//!                    │   Window    │◀───│   Round to  │◀───│  One Euro   │
//!                    │   layout    │    │   pixels    │    │  (x and y)  │
//!                    └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! Filters, history and resampler are single-threaded and perform no I/O.
//! Every query returns a best-effort position; only configuration and trace
//! files can fail.

pub mod time;
pub mod filter;
pub mod resample;
pub mod routing;
pub mod replay;
pub mod app;

// Re-export commonly used types
pub use filter::{FilterParam, OneEuroFilter, DEFAULT_FILTER_PARAM, STARTUP_FILTER_PARAM};
pub use resample::{MoveEvent, MoveResampler};
pub use routing::{MoveRouter, TargetUpdate};
pub use time::VsyncClock;

/// Result type alias for the move resampler
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the move resampler
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Trace error: {0}")]
    Trace(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
