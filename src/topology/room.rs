use serde::Serialize;

use crate::math::{polygon_area, polygon_centroid, polygon_perimeter, Point2, TOLERANCE};

use super::corner::CornerId;
use super::wall::WallId;

/// A closed loop of walls, derived from the wall graph.
///
/// Rooms are not authored. The whole list is rebuilt after every topology
/// change, so `id` is only the room's index in the current list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: usize,
    /// Corner positions in counter-clockwise order.
    pub polygon: Vec<Point2>,
    /// Corner ids, parallel to `polygon`.
    pub corners: Vec<CornerId>,
    /// Bounding walls; `walls[i]` joins `corners[i]` and `corners[i + 1]`.
    pub walls: Vec<WallId>,
    pub area: f64,
    pub perimeter: f64,
    pub center: Point2,
}

impl Room {
    /// Builds a room from a closed corner loop, computing its metrics.
    #[must_use]
    pub fn from_loop(
        id: usize,
        corners: Vec<CornerId>,
        walls: Vec<WallId>,
        polygon: Vec<Point2>,
    ) -> Self {
        let area = polygon_area(&polygon);
        let perimeter = polygon_perimeter(&polygon);
        let center = polygon_centroid(&polygon);
        Self {
            id,
            polygon,
            corners,
            walls,
            area,
            perimeter,
            center,
        }
    }

    /// Identity of a room across recomputations: its sorted wall set.
    #[must_use]
    pub fn key(&self) -> Vec<WallId> {
        let mut key = self.walls.clone();
        key.sort_unstable();
        key
    }

    /// Whether two rooms with the same key differ in shape.
    #[must_use]
    pub fn geometry_differs(&self, other: &Room) -> bool {
        self.polygon.len() != other.polygon.len()
            || (self.area - other.area).abs() > TOLERANCE
            || self
                .polygon
                .iter()
                .zip(&other.polygon)
                .any(|(a, b)| (a - b).norm() > TOLERANCE)
    }
}
