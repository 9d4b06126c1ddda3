use crate::error::Result;
use crate::math::{closest_point_on_segment, distance, is_finite_point, Point2};
use crate::topology::{FloorplanStore, WallId};

/// Result of a wall hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub wall: WallId,
    /// The closest point on the wall centreline.
    pub point: Point2,
    /// Distance along the wall from its start corner to `point`.
    pub offset: f64,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

/// Finds the wall whose centreline passes closest to a point.
///
/// Walls are treated as their start-to-end chord, curved ones included.
pub struct WallAtPoint {
    point: Point2,
    tolerance: f64,
}

impl WallAtPoint {
    /// Creates a new `WallAtPoint` query.
    #[must_use]
    pub fn new(point: Point2, tolerance: f64) -> Self {
        Self { point, tolerance }
    }

    /// Executes the query, returning the nearest wall within tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if a wall references a missing corner.
    pub fn execute(&self, store: &FloorplanStore) -> Result<Option<WallHit>> {
        if !is_finite_point(&self.point) {
            return Ok(None);
        }
        let mut best: Option<WallHit> = None;
        for (id, _) in store.walls() {
            let (start, end) = store.wall_endpoints(id)?;
            let closest = closest_point_on_segment(&self.point, &start, &end);
            let d = distance(&self.point, &closest);
            if d > self.tolerance {
                continue;
            }
            if best.is_none_or(|b| d < b.distance) {
                best = Some(WallHit {
                    wall: id,
                    point: closest,
                    offset: distance(&start, &closest),
                    distance: d,
                });
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::{CornerData, WallCurve, WallData};

    #[test]
    fn hit_reports_offset_along_wall() {
        let mut store = FloorplanStore::new();
        let a = store.add_corner(CornerData::new(Point2::new(0.0, 0.0)));
        let b = store.add_corner(CornerData::new(Point2::new(6.0, 0.0)));
        let w = store.add_wall(WallData::new(a, b, WallCurve::Straight)).unwrap();

        let hit = WallAtPoint::new(Point2::new(2.5, 0.1), 0.2)
            .execute(&store)
            .unwrap()
            .unwrap();
        assert_eq!(hit.wall, w);
        assert!((hit.offset - 2.5).abs() < 1e-12);
        assert!((hit.distance - 0.1).abs() < 1e-12);

        assert!(WallAtPoint::new(Point2::new(2.5, 1.0), 0.2)
            .execute(&store)
            .unwrap()
            .is_none());
    }
}
