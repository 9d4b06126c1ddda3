use crate::error::Result;
use crate::math::{segments_intersect, Point2};
use crate::topology::{FloorplanStore, WallId};

/// Lists existing walls that a proposed segment would cross.
///
/// Walls sharing a corner position with either end of the segment are not
/// reported, since meeting at a corner is how walls connect.
pub struct CrossingWalls {
    start: Point2,
    end: Point2,
    tolerance: f64,
}

impl CrossingWalls {
    /// Creates a new `CrossingWalls` query. Endpoints within `tolerance` of
    /// a wall's corner count as shared.
    #[must_use]
    pub fn new(start: Point2, end: Point2, tolerance: f64) -> Self {
        Self {
            start,
            end,
            tolerance,
        }
    }

    /// Executes the query, returning crossed walls in arena order.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall references a missing corner.
    pub fn execute(&self, store: &FloorplanStore) -> Result<Vec<WallId>> {
        let mut crossed = Vec::new();
        for (id, _) in store.walls() {
            let (a, b) = store.wall_endpoints(id)?;
            let shares_corner = [a, b].iter().any(|c| {
                (c - self.start).norm() <= self.tolerance || (c - self.end).norm() <= self.tolerance
            });
            if !shares_corner && segments_intersect(&self.start, &self.end, &a, &b) {
                crossed.push(id);
            }
        }
        Ok(crossed)
    }
}
