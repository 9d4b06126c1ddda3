use tracing::{debug, warn};

use super::{AdjustedEndpoints, WallService};
use crate::error::Result;
use crate::math::is_finite_point;
use crate::topology::WallId;

impl WallService {
    /// Writes trimmed end points back into the graph.
    ///
    /// Each entry overwrites the positions of its wall's two corners, so a
    /// corner shared by several entries ends up where the last one put it.
    /// Unknown walls and non-finite points are skipped. Rooms are
    /// recomputed once, after all entries. Returns the number of walls
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store is inconsistent.
    pub fn sync_adjusted_endpoints<I>(&mut self, adjusted: I) -> Result<usize>
    where
        I: IntoIterator<Item = (WallId, AdjustedEndpoints)>,
    {
        let mut applied = 0;
        for (id, ends) in adjusted {
            let Ok(wall) = self.store.wall(id) else {
                debug!(?id, "skipping adjusted endpoints for unknown wall");
                continue;
            };
            if !is_finite_point(&ends.start) || !is_finite_point(&ends.end) {
                warn!(?id, ?ends, "skipping non-finite adjusted endpoints");
                continue;
            }
            let (start, end) = (wall.start, wall.end);
            for (corner, position) in [(start, ends.start), (end, ends.end)] {
                if self.store.corner(corner)?.position != position {
                    self.set_corner_position(corner, position)?;
                }
            }
            applied += 1;
        }
        if applied > 0 {
            self.notify_topology_changed()?;
        }
        Ok(applied)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::WallOptions;
    use super::*;
    use crate::config::WallConfig;
    use crate::events::EventKind;
    use crate::math::Point2;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn applies_known_walls_and_skips_unknown() {
        let mut svc = WallService::new(WallConfig::default());
        let a = svc.create_wall(p(0.0, 0.0), p(4.0, 0.0), &WallOptions::new()).unwrap().unwrap();
        let gone = svc
            .create_wall(p(10.0, 0.0), p(12.0, 0.0), &WallOptions::new())
            .unwrap()
            .unwrap();
        svc.remove_wall(gone.id).unwrap();

        let moved = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&moved);
        svc.add_event_listener(EventKind::CornerMoved, move |_| *sink.borrow_mut() += 1);

        let mut adjusted = HashMap::new();
        adjusted.insert(a.id, AdjustedEndpoints { start: p(0.1, 0.0), end: p(4.0, 0.0) });
        adjusted.insert(gone.id, AdjustedEndpoints { start: p(0.0, 0.0), end: p(1.0, 0.0) });

        assert_eq!(svc.sync_adjusted_endpoints(adjusted).unwrap(), 1);
        assert_eq!(svc.wall(a.id).unwrap().start_point, p(0.1, 0.0));
        assert_eq!(*moved.borrow(), 1);
    }

    #[test]
    fn later_entry_wins_on_shared_corner() {
        let mut svc = WallService::new(WallConfig::default());
        let a = svc.create_wall(p(0.0, 0.0), p(4.0, 0.0), &WallOptions::new()).unwrap().unwrap();
        let b = svc.create_wall(p(4.0, 0.0), p(4.0, 3.0), &WallOptions::new()).unwrap().unwrap();

        let adjusted = vec![
            (a.id, AdjustedEndpoints { start: p(0.0, 0.0), end: p(3.9, 0.0) }),
            (b.id, AdjustedEndpoints { start: p(4.0, 0.1), end: p(4.0, 3.0) }),
        ];
        assert_eq!(svc.sync_adjusted_endpoints(adjusted).unwrap(), 2);
        assert_eq!(svc.wall(a.id).unwrap().end_point, p(4.0, 0.1));
        assert_eq!(svc.corner(a.corners[1]).unwrap().position, p(4.0, 0.1));
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut svc = WallService::new(WallConfig::default());
        let rooms = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&rooms);
        svc.add_event_listener(EventKind::RoomCreated, move |_| *sink.borrow_mut() += 1);
        assert_eq!(svc.sync_adjusted_endpoints(Vec::new()).unwrap(), 0);
        assert_eq!(*rooms.borrow(), 0);
    }
}
