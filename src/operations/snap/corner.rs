use tracing::warn;

use crate::math::{is_finite_point, Point2};
use crate::topology::{CornerId, FloorplanStore};

/// Finds the existing corner the pointer should stick to.
#[derive(Debug, Clone, Copy)]
pub struct CornerSnap {
    tolerance: f64,
}

impl CornerSnap {
    /// Creates a new `CornerSnap` with the given search radius.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Executes the search, returning the nearest corner within tolerance
    /// and its exact position.
    #[must_use]
    pub fn execute(&self, store: &FloorplanStore, point: &Point2) -> Option<(CornerId, Point2)> {
        if !is_finite_point(point) {
            warn!(?point, "ignoring corner snap for non-finite point");
            return None;
        }
        let (id, _) = store.nearest_corner(point, self.tolerance)?;
        store.corner(id).ok().map(|c| (id, c.position))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::CornerData;

    #[test]
    fn picks_nearest_of_two_candidates() {
        let mut store = FloorplanStore::new();
        store.add_corner(CornerData::new(Point2::new(0.0, 0.0)));
        let near = store.add_corner(CornerData::new(Point2::new(0.2, 0.0)));
        let (id, pos) = CornerSnap::new(0.15)
            .execute(&store, &Point2::new(0.14, 0.0))
            .unwrap();
        assert_eq!(id, near);
        assert_eq!(pos, Point2::new(0.2, 0.0));
    }

    #[test]
    fn nothing_in_range() {
        let mut store = FloorplanStore::new();
        store.add_corner(CornerData::new(Point2::new(0.0, 0.0)));
        assert!(CornerSnap::new(0.15).execute(&store, &Point2::new(1.0, 0.0)).is_none());
        assert!(CornerSnap::new(0.15)
            .execute(&store, &Point2::new(f64::INFINITY, 0.0))
            .is_none());
    }
}
