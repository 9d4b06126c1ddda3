pub mod corner;
pub mod opening;
pub mod room;
pub mod wall;

pub use corner::{CornerData, CornerDescriptor, CornerId};
pub use opening::{OpeningData, OpeningDescriptor, OpeningId, OpeningKind};
pub use room::Room;
pub use wall::{
    DirectedWall, WallCurve, WallData, WallDescriptor, WallId, WallMaterial, WallType,
};

use crate::error::TopologyError;
use crate::math::{direction_degrees, Point2};
use slotmap::SlotMap;

/// Central arena that owns every corner, wall and opening.
///
/// Entities reference each other via typed IDs (generational indices).
/// Corners keep back-references to their walls; the store keeps those lists
/// in step with wall insertion and removal.
#[derive(Debug, Default)]
pub struct FloorplanStore {
    corners: SlotMap<CornerId, CornerData>,
    walls: SlotMap<WallId, WallData>,
    openings: SlotMap<OpeningId, OpeningData>,
}

impl FloorplanStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.corners.clear();
        self.walls.clear();
        self.openings.clear();
    }

    // --- Corner operations ---

    /// Inserts a corner and returns its ID.
    pub fn add_corner(&mut self, data: CornerData) -> CornerId {
        self.corners.insert(data)
    }

    /// Returns a reference to the corner data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner is not in the store.
    pub fn corner(&self, id: CornerId) -> Result<&CornerData, TopologyError> {
        self.corners
            .get(id)
            .ok_or_else(|| TopologyError::CornerNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the corner data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner is not in the store.
    pub fn corner_mut(&mut self, id: CornerId) -> Result<&mut CornerData, TopologyError> {
        self.corners
            .get_mut(id)
            .ok_or_else(|| TopologyError::CornerNotFound(format!("{id:?}")))
    }

    /// Removes a corner. Walls still referencing it are left dangling, so
    /// callers only remove corners whose wall list is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner is not in the store.
    pub fn remove_corner(&mut self, id: CornerId) -> Result<CornerData, TopologyError> {
        self.corners
            .remove(id)
            .ok_or_else(|| TopologyError::CornerNotFound(format!("{id:?}")))
    }

    /// Iterates over all corners in arena order.
    pub fn corners(&self) -> impl Iterator<Item = (CornerId, &CornerData)> {
        self.corners.iter()
    }

    /// Number of corners.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Finds the corner nearest to `point` within `tolerance` (inclusive).
    #[must_use]
    pub fn nearest_corner(&self, point: &Point2, tolerance: f64) -> Option<(CornerId, f64)> {
        self.corners
            .iter()
            .map(|(id, c)| (id, c.distance_from(point)))
            .filter(|&(_, d)| d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Angle in degrees from `corner` toward the far end of each incident wall.
    ///
    /// Returned in back-reference order, not sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the corner or one of its walls is missing.
    pub fn incident_angles(&self, corner: CornerId) -> Result<Vec<(WallId, f64)>, TopologyError> {
        let data = self.corner(corner)?;
        data.walls
            .iter()
            .map(|&wall_id| {
                let wall = self.wall(wall_id)?;
                let far = wall
                    .opposite_corner(corner)
                    .ok_or_else(|| TopologyError::CornerNotFound(format!("{corner:?}")))?;
                let far_pos = self.corner(far)?.position;
                Ok((wall_id, direction_degrees(&data.position, &far_pos)))
            })
            .collect()
    }

    // --- Wall operations ---

    /// Inserts a wall, registers it with both of its corners and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if either corner is not in the store.
    pub fn add_wall(&mut self, data: WallData) -> Result<WallId, TopologyError> {
        self.corner(data.start)?;
        self.corner(data.end)?;
        let (start, end) = (data.start, data.end);
        let id = self.walls.insert(data);
        self.corner_mut(start)?.walls.push(id);
        if end != start {
            self.corner_mut(end)?.walls.push(id);
        }
        Ok(id)
    }

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the store.
    pub fn wall(&self, id: WallId) -> Result<&WallData, TopologyError> {
        self.walls
            .get(id)
            .ok_or_else(|| TopologyError::WallNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the store.
    pub fn wall_mut(&mut self, id: WallId) -> Result<&mut WallData, TopologyError> {
        self.walls
            .get_mut(id)
            .ok_or_else(|| TopologyError::WallNotFound(format!("{id:?}")))
    }

    /// Removes a wall, detaching it from both corners and dropping its openings.
    ///
    /// Corners are kept even if they end up with no walls.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the store.
    pub fn remove_wall(&mut self, id: WallId) -> Result<WallData, TopologyError> {
        let data = self
            .walls
            .remove(id)
            .ok_or_else(|| TopologyError::WallNotFound(format!("{id:?}")))?;
        for corner in [data.start, data.end] {
            if let Some(c) = self.corners.get_mut(corner) {
                c.walls.retain(|&w| w != id);
            }
        }
        for opening in &data.openings {
            self.openings.remove(*opening);
        }
        Ok(data)
    }

    /// Iterates over all walls in arena order.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> {
        self.walls.iter()
    }

    /// Number of walls.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Finds the wall joining `a` and `b`, in either direction.
    #[must_use]
    pub fn wall_between(&self, a: CornerId, b: CornerId) -> Option<WallId> {
        let corner = self.corners.get(a)?;
        corner
            .walls
            .iter()
            .copied()
            .find(|&w| self.walls.get(w).is_some_and(|wall| wall.connects(a, b)))
    }

    /// Start and end positions of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of its corners is missing.
    pub fn wall_endpoints(&self, id: WallId) -> Result<(Point2, Point2), TopologyError> {
        let wall = self.wall(id)?;
        Ok((
            self.corner(wall.start)?.position,
            self.corner(wall.end)?.position,
        ))
    }

    /// Length of a wall; curved walls are sampled with `samples` chords.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of its corners is missing.
    pub fn wall_length(&self, id: WallId, samples: u32) -> Result<f64, TopologyError> {
        let (start, end) = self.wall_endpoints(id)?;
        Ok(self.wall(id)?.length(&start, &end, samples))
    }

    /// Builds the plain-data descriptor of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall or one of its corners is missing.
    pub fn wall_descriptor(
        &self,
        id: WallId,
        samples: u32,
    ) -> Result<WallDescriptor, TopologyError> {
        let wall = self.wall(id)?;
        let (start_point, end_point) = self.wall_endpoints(id)?;
        Ok(WallDescriptor {
            id,
            start_point,
            end_point,
            length: wall.length(&start_point, &end_point, samples),
            thickness: wall.thickness,
            height: wall.height,
            wall_type: wall.wall_type(),
            material: wall.material,
            corners: [wall.start, wall.end],
            bezier_control_points: wall.control_points(),
            openings: wall.openings.clone(),
        })
    }

    // --- Opening operations ---

    /// Inserts an opening and registers it with its wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the store.
    pub fn add_opening(&mut self, data: OpeningData) -> Result<OpeningId, TopologyError> {
        let wall = data.wall;
        self.wall(wall)?;
        let id = self.openings.insert(data);
        self.wall_mut(wall)?.openings.push(id);
        Ok(id)
    }

    /// Returns a reference to the opening data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening is not in the store.
    pub fn opening(&self, id: OpeningId) -> Result<&OpeningData, TopologyError> {
        self.openings
            .get(id)
            .ok_or_else(|| TopologyError::OpeningNotFound(format!("{id:?}")))
    }

    /// Removes an opening and detaches it from its wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the opening is not in the store.
    pub fn remove_opening(&mut self, id: OpeningId) -> Result<OpeningData, TopologyError> {
        let data = self
            .openings
            .remove(id)
            .ok_or_else(|| TopologyError::OpeningNotFound(format!("{id:?}")))?;
        if let Some(wall) = self.walls.get_mut(data.wall) {
            wall.openings.retain(|&o| o != id);
        }
        Ok(data)
    }

    /// Openings of a wall, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the store.
    pub fn wall_openings(
        &self,
        wall: WallId,
    ) -> Result<Vec<(OpeningId, &OpeningData)>, TopologyError> {
        self.wall(wall)?
            .openings
            .iter()
            .map(|&id| Ok((id, self.opening(id)?)))
            .collect()
    }
}
