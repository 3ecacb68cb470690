//! Move-event routing
//!
//! Decides per pointer event whether a drag update goes through the
//! resampler or is applied directly.

pub mod types;
pub mod move_router;

pub use types::{PointerAction, PointerSample, PointerSourceType, TargetUpdate};
pub use move_router::MoveRouter;
