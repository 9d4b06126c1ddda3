mod prune;
mod trace;

use std::collections::HashSet;

use tracing::trace;

use crate::error::Result;
use crate::math::{signed_area, TOLERANCE};
use crate::topology::{DirectedWall, FloorplanStore, Room};

/// Recomputes every room from the wall graph.
///
/// Walls hanging off a dead-end corner are pruned first, since they cannot
/// bound a room. Each remaining wall is then walked in both directions,
/// always taking the smallest clockwise turn at a corner. A walk that comes
/// back to its starting wall within `max_steps` walls, visits at least three
/// distinct corners and winds clockwise is a room; the counter-clockwise
/// walks are the outer boundaries of connected wall groups and are dropped.
#[derive(Debug, Clone, Copy)]
pub struct DetectRooms {
    max_steps: usize,
}

impl Default for DetectRooms {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectRooms {
    /// Loop walks give up after this many walls.
    pub const MAX_STEPS: usize = 100;

    /// Creates a new `DetectRooms` operation with the default step cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_steps: Self::MAX_STEPS,
        }
    }

    /// Overrides the step cap.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Executes the detection, returning rooms with counter-clockwise polygons.
    ///
    /// # Errors
    ///
    /// Returns an error if the store holds a wall whose corners are missing.
    pub fn execute(&self, store: &FloorplanStore) -> Result<Vec<Room>> {
        let active = prune::room_bounding_walls(store);
        let mut visited: HashSet<DirectedWall> = HashSet::new();
        let mut rooms = Vec::new();

        for (wall_id, _) in store.walls() {
            if !active.contains(&wall_id) {
                continue;
            }
            for forward in [true, false] {
                let start = DirectedWall::new(wall_id, forward);
                if visited.contains(&start) {
                    continue;
                }
                let Some(walk) =
                    trace::trace_loop(store, start, &active, &mut visited, self.max_steps)?
                else {
                    trace!(?start, "wall walk did not close");
                    continue;
                };
                if let Some(room) = walk_to_room(store, walk, rooms.len())? {
                    rooms.push(room);
                }
            }
        }

        Ok(rooms)
    }
}

/// Accepts a closed walk as a room if it is a simple clockwise loop.
fn walk_to_room(
    store: &FloorplanStore,
    walk: trace::ClosedWalk,
    id: usize,
) -> Result<Option<Room>> {
    let trace::ClosedWalk {
        mut corners,
        mut walls,
    } = walk;

    let distinct: HashSet<_> = corners.iter().collect();
    if corners.len() < 3 || distinct.len() != corners.len() {
        return Ok(None);
    }

    let polygon = corners
        .iter()
        .map(|&c| Ok(store.corner(c)?.position))
        .collect::<Result<Vec<_>>>()?;
    if signed_area(&polygon) > -TOLERANCE {
        return Ok(None);
    }

    // Flip to counter-clockwise, keeping the first corner and the
    // walls[i] = corners[i] -> corners[i + 1] pairing.
    corners[1..].reverse();
    walls.reverse();
    let mut polygon = polygon;
    polygon[1..].reverse();

    Ok(Some(Room::from_loop(id, corners, walls, polygon)))
}
