use serde::Serialize;
use tracing::warn;

use crate::math::{is_finite_point, Point2};
use crate::topology::FloorplanStore;

/// An alignment hint through an existing corner.
///
/// `vertical` means the preview shares the corner's x coordinate (draw a
/// vertical line through `x`); `horizontal` means it shares y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignmentGuide {
    pub x: f64,
    pub y: f64,
    pub vertical: bool,
    pub horizontal: bool,
}

/// Collects alignment guides for a preview point.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentGuides {
    tolerance: f64,
}

impl AlignmentGuides {
    /// Creates a new `AlignmentGuides` query with the given coordinate tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Executes the query: one guide per corner aligned with `point` on
    /// either axis, in arena order.
    #[must_use]
    pub fn execute(&self, store: &FloorplanStore, point: &Point2) -> Vec<AlignmentGuide> {
        if !is_finite_point(point) {
            warn!(?point, "ignoring alignment guides for non-finite point");
            return Vec::new();
        }
        store
            .corners()
            .filter_map(|(_, c)| {
                let vertical = (c.position.x - point.x).abs() <= self.tolerance;
                let horizontal = (c.position.y - point.y).abs() <= self.tolerance;
                (vertical || horizontal).then_some(AlignmentGuide {
                    x: c.position.x,
                    y: c.position.y,
                    vertical,
                    horizontal,
                })
            })
            .collect()
    }
}
