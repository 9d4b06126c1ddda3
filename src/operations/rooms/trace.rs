use std::collections::HashSet;
use std::f64::consts::TAU;

use crate::error::Result;
use crate::topology::{CornerId, DirectedWall, FloorplanStore, WallId};

/// A walk that returned to its starting wall.
///
/// `walls[i]` runs from `corners[i]` to `corners[i + 1]` (wrapping).
#[derive(Debug)]
pub struct ClosedWalk {
    pub corners: Vec<CornerId>,
    pub walls: Vec<WallId>,
}

/// Walks the wall graph from `start`, turning as far clockwise as possible
/// at every corner.
///
/// Returns `None` if the walk runs into an already visited wall or does not
/// close within `max_steps` walls.
pub fn trace_loop(
    store: &FloorplanStore,
    start: DirectedWall,
    active: &HashSet<WallId>,
    visited: &mut HashSet<DirectedWall>,
    max_steps: usize,
) -> Result<Option<ClosedWalk>> {
    let mut corners = Vec::new();
    let mut walls = Vec::new();
    let mut current = start;

    for _ in 0..max_steps {
        visited.insert(current);
        let wall = store.wall(current.wall)?;
        corners.push(wall.tail(current.forward));
        walls.push(current.wall);

        let Some(next) = pick_next_wall(store, current, active)? else {
            return Ok(None);
        };
        if next == start {
            return Ok(Some(ClosedWalk { corners, walls }));
        }
        if visited.contains(&next) {
            return Ok(None);
        }
        current = next;
    }

    Ok(None)
}

/// Picks the continuation at the head of `incoming` with the minimum
/// counter-clockwise angle from the reversed incoming direction.
///
/// Turning back along the same wall is only chosen when nothing else is
/// available.
fn pick_next_wall(
    store: &FloorplanStore,
    incoming: DirectedWall,
    active: &HashSet<WallId>,
) -> Result<Option<DirectedWall>> {
    let wall = store.wall(incoming.wall)?;
    let node_id = wall.head(incoming.forward);
    let node = store.corner(node_id)?;
    let from = store.corner(wall.tail(incoming.forward))?.position;
    let here = node.position;

    let reverse_angle = (from.y - here.y).atan2(from.x - here.x);
    let mut best: Option<(DirectedWall, f64)> = None;

    for &next_id in node.incident_walls() {
        if !active.contains(&next_id) {
            continue;
        }
        let next = store.wall(next_id)?;
        let forward = next.start == node_id;
        let target = store.corner(next.head(forward))?.position;
        let next_angle = (target.y - here.y).atan2(target.x - here.x);

        let delta = if next_id == incoming.wall {
            TAU
        } else {
            let d = normalize_angle(next_angle - reverse_angle);
            if d < crate::math::TOLERANCE {
                TAU
            } else {
                d
            }
        };

        if best.is_none_or(|(_, bd)| delta < bd) {
            best = Some((DirectedWall::new(next_id, forward), delta));
        }
    }

    Ok(best.map(|(w, _)| w))
}

/// Normalizes an angle to [0, 2pi).
fn normalize_angle(a: f64) -> f64 {
    let r = a % TAU;
    if r < 0.0 {
        r + TAU
    } else {
        r
    }
}
