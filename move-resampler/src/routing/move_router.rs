//! Move Router
//!
//! Sits between pointer dispatch and window layout during a drag. Touch
//! move events are buffered in a [`MoveResampler`] and applied once per
//! vsync; everything else is applied as it arrives.

use super::types::{PointerAction, PointerSample, PointerSourceType, TargetUpdate};
use crate::app::config::Config;
use crate::resample::MoveResampler;
use tracing::{debug, warn};

/// Routes pointer samples of one drag either through the resampler or
/// straight to layout
#[derive(Debug, Clone)]
pub struct MoveRouter {
    resampler: MoveResampler,
    enable_move_resample: bool,
    moving: bool,
}

impl MoveRouter {
    pub fn new(resampler: MoveResampler, enable_move_resample: bool) -> Self {
        Self {
            resampler,
            enable_move_resample,
            moving: false,
        }
    }

    /// Build from the `[resampler]` and `[routing]` config sections
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.resampler.build(),
            config.routing.enable_move_resample,
        )
    }

    /// Only touchscreen move events are resampled
    pub fn should_resample(&self, sample: &PointerSample) -> bool {
        self.enable_move_resample
            && sample.source == PointerSourceType::Touchscreen
            && sample.action == PointerAction::Move
    }

    /// A drag started. Clears state left by the previous gesture.
    pub fn begin_move(&mut self) {
        self.resampler.reset();
        self.moving = true;
        debug!("move started");
    }

    /// The drag ended or was interrupted
    pub fn end_move(&mut self) {
        self.moving = false;
        self.resampler.reset();
        debug!("move ended");
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn resampler(&self) -> &MoveResampler {
        &self.resampler
    }

    /// Feed one pointer event. A terminal action ends the move and is
    /// applied directly.
    pub fn on_move_event(&mut self, sample: &PointerSample) -> TargetUpdate {
        if sample.action.is_terminal() {
            if self.moving {
                self.end_move();
            }
            return TargetUpdate::Direct(sample.as_move_event());
        }
        if self.should_resample(sample) {
            self.resampler
                .push_event(sample.time_us, sample.offset_x, sample.offset_y);
            return TargetUpdate::ResampleRequired;
        }
        TargetUpdate::Direct(sample.as_move_event())
    }

    /// Produce the offset to apply on this vsync
    pub fn on_vsync(&mut self, vsync_time_us: i64) -> TargetUpdate {
        if !self.moving {
            warn!(vsync_time_us, "not moving, skipping resampled update");
            return TargetUpdate::Unchanged;
        }
        TargetUpdate::Direct(self.resampler.resample_at(vsync_time_us))
    }
}

impl Default for MoveRouter {
    fn default() -> Self {
        Self::new(MoveResampler::default(), true)
    }
}
