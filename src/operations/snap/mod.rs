//! Pointer snapping for interactive wall drawing.

mod angle;
mod corner;
mod guides;

pub use angle::{AngleSnap, AngleSnapResult};
pub use corner::CornerSnap;
pub use guides::{AlignmentGuide, AlignmentGuides};
