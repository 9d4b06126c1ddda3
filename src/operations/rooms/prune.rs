use std::collections::{HashMap, HashSet};

use crate::topology::{CornerId, FloorplanStore, WallId};

/// Returns the walls that can bound a room.
///
/// Repeatedly strips walls with a dead-end corner (degree 1 among the
/// remaining walls) until none are left. What survives is every wall that
/// lies on some cycle or on a path between cycles.
pub fn room_bounding_walls(store: &FloorplanStore) -> HashSet<WallId> {
    let mut active: HashSet<WallId> = store.walls().map(|(id, _)| id).collect();
    let mut degree: HashMap<CornerId, usize> = HashMap::new();
    for (_, wall) in store.walls() {
        *degree.entry(wall.start).or_default() += 1;
        *degree.entry(wall.end).or_default() += 1;
    }

    let mut dead_ends: Vec<CornerId> = degree
        .iter()
        .filter(|&(_, &d)| d == 1)
        .map(|(&c, _)| c)
        .collect();

    while let Some(corner) = dead_ends.pop() {
        let Ok(data) = store.corner(corner) else {
            continue;
        };
        let Some(&wall_id) = data.incident_walls().iter().find(|w| active.contains(*w)) else {
            continue;
        };
        active.remove(&wall_id);

        let Ok(wall) = store.wall(wall_id) else {
            continue;
        };
        for end in [wall.start, wall.end] {
            if let Some(d) = degree.get_mut(&end) {
                *d = d.saturating_sub(1);
                if *d == 1 {
                    dead_ends.push(end);
                }
            }
        }
    }

    active
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::topology::{CornerData, WallCurve, WallData};

    fn chain(store: &mut FloorplanStore, pts: &[(f64, f64)]) -> Vec<WallId> {
        let ids: Vec<_> = pts
            .iter()
            .map(|&(x, y)| store.add_corner(CornerData::new(Point2::new(x, y))))
            .collect();
        ids.windows(2)
            .map(|w| store.add_wall(WallData::new(w[0], w[1], WallCurve::Straight)).unwrap())
            .collect()
    }

    #[test]
    fn open_chain_prunes_completely() {
        let mut store = FloorplanStore::new();
        chain(&mut store, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0)]);
        assert!(room_bounding_walls(&store).is_empty());
    }

    #[test]
    fn closed_triangle_survives() {
        let mut store = FloorplanStore::new();
        let walls = chain(&mut store, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let (_, first) = store.walls().next().unwrap();
        let (a, c) = (first.start, store.wall(walls[1]).unwrap().end);
        let closing = store.add_wall(WallData::new(c, a, WallCurve::Straight)).unwrap();
        let active = room_bounding_walls(&store);
        assert_eq!(active.len(), 3);
        assert!(active.contains(&closing));
    }
}
