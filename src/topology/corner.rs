use serde::Serialize;

use crate::math::{distance, Point2};

use super::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a corner in the floor plan store.
    pub struct CornerId;
}

/// Data associated with a corner: a shared wall endpoint in plan.
///
/// The corner does not own its walls; `walls` is a back-reference list
/// maintained by [`FloorplanStore`](super::FloorplanStore).
#[derive(Debug, Clone)]
pub struct CornerData {
    /// Plan position of the corner.
    pub position: Point2,
    /// Base elevation of the corner.
    pub elevation: f64,
    /// Walls that start or end at this corner.
    pub(crate) walls: Vec<WallId>,
}

impl CornerData {
    /// Creates a new corner at the given position with zero elevation.
    #[must_use]
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            elevation: 0.0,
            walls: Vec::new(),
        }
    }

    /// Distance from this corner to `point`.
    #[must_use]
    pub fn distance_from(&self, point: &Point2) -> f64 {
        distance(&self.position, point)
    }

    /// Walls referencing this corner as start or end.
    #[must_use]
    pub fn incident_walls(&self) -> &[WallId] {
        &self.walls
    }

    /// Number of incident walls.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.walls.len()
    }
}

/// Plain-data view of a corner handed to rendering collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerDescriptor {
    pub id: CornerId,
    pub position: Point2,
    pub elevation: f64,
    pub walls: Vec<WallId>,
}

impl CornerDescriptor {
    pub(crate) fn new(id: CornerId, data: &CornerData) -> Self {
        Self {
            id,
            position: data.position,
            elevation: data.elevation,
            walls: data.walls.clone(),
        }
    }
}
