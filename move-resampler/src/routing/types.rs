//! Pointer event types seen by the move router

use crate::resample::MoveEvent;
use serde::{Deserialize, Serialize};

/// Device class that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSourceType {
    Mouse,
    #[default]
    Touchscreen,
    Touchpad,
}

/// What the pointer did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    /// Finger or pen touched down
    Down,
    /// Pointer moved while down
    Move,
    /// Finger or pen lifted
    Up,
    /// Gesture cancelled by the system
    Cancel,
    /// Mouse button pressed
    ButtonDown,
    /// Mouse button released
    ButtonUp,
}

impl PointerAction {
    /// Actions that end a gesture
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PointerAction::Up | PointerAction::Cancel | PointerAction::ButtonUp
        )
    }
}

/// One pointer event, already converted to an offset from the drag start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSample {
    /// Action time in microseconds
    pub time_us: i64,
    pub source: PointerSourceType,
    pub action: PointerAction,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl PointerSample {
    /// Touchscreen move sample
    pub fn touch_move(time_us: i64, offset_x: i32, offset_y: i32) -> Self {
        Self {
            time_us,
            source: PointerSourceType::Touchscreen,
            action: PointerAction::Move,
            offset_x,
            offset_y,
        }
    }

    pub fn as_move_event(&self) -> MoveEvent {
        MoveEvent::new(self.time_us, self.offset_x, self.offset_y)
    }
}

/// Outcome of feeding an event or a vsync tick to the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetUpdate {
    /// Nothing to apply
    Unchanged,
    /// The sample went to the resampler; apply on the next vsync
    ResampleRequired,
    /// Apply this offset now
    Direct(MoveEvent),
}
