mod drawing;
mod openings;
mod options;
mod snapshot;
mod sync;

pub use drawing::{DrawingSession, DrawingState, Key, PointerEvent};
pub use openings::OpeningSpec;
pub use options::{AdjustedEndpoints, WallOptions, WallRequest, WallUpdate};
pub use snapshot::FloorplanSnapshot;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::{ConfigUpdate, WallConfig};
use crate::error::{OperationError, Result};
use crate::events::{EventBus, EventKind, ListenerId, TopologyEvent};
use crate::math::{distance, is_finite_point, Point2, Vector2};
use crate::operations::query::{CrossingWalls, WallAtPoint, WallHit};
use crate::operations::rooms::DetectRooms;
use crate::topology::{
    CornerData, CornerDescriptor, CornerId, FloorplanStore, Room, WallCurve, WallData,
    WallDescriptor, WallId, WallType,
};

/// Owner of the wall graph, its derived rooms and the drawing session.
///
/// Every operation runs to completion before returning. Listeners are
/// called synchronously from inside the operation that triggered them.
#[derive(Debug, Default)]
pub struct WallService {
    store: FloorplanStore,
    rooms: Vec<Room>,
    config: WallConfig,
    events: EventBus,
    drawing_mode: bool,
    session: Option<DrawingSession>,
}

/// Outcome of inserting one wall without recomputing rooms.
enum Inserted {
    Rejected,
    Existing(WallDescriptor),
    Added(WallDescriptor),
}

impl WallService {
    /// Creates an empty service with the given configuration.
    #[must_use]
    pub fn new(config: WallConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // --- Accessors ---

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &FloorplanStore {
        &self.store
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    /// Descriptors of all walls, in arena order.
    #[must_use]
    pub fn walls(&self) -> Vec<WallDescriptor> {
        self.store
            .walls()
            .filter_map(|(id, _)| {
                self.store
                    .wall_descriptor(id, self.config.bezier_samples)
                    .ok()
            })
            .collect()
    }

    /// Descriptor of a single wall.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::WallNotFound` if the id is unknown.
    pub fn wall(&self, id: WallId) -> Result<WallDescriptor> {
        Ok(self.store.wall_descriptor(id, self.config.bezier_samples)?)
    }

    /// Descriptors of all corners, in arena order.
    #[must_use]
    pub fn corners(&self) -> Vec<CornerDescriptor> {
        self.store
            .corners()
            .map(|(id, c)| CornerDescriptor::new(id, c))
            .collect()
    }

    /// Descriptor of a single corner.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::CornerNotFound` if the id is unknown.
    pub fn corner(&self, id: CornerId) -> Result<CornerDescriptor> {
        Ok(CornerDescriptor::new(id, self.store.corner(id)?))
    }

    /// Rooms from the latest recomputation.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    // --- Events and configuration ---

    /// Registers a listener for one kind of event.
    pub fn add_event_listener<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&TopologyEvent) + 'static,
    {
        self.events.subscribe(kind, handler)
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Applies a partial configuration update.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` if the result would be invalid; the
    /// configuration is then left unchanged.
    pub fn update_configuration(&mut self, update: &ConfigUpdate) -> Result<()> {
        self.config.apply(update)?;
        debug!(?update, "configuration updated");
        Ok(())
    }

    fn emit(&mut self, event: &TopologyEvent) {
        self.events.emit(event);
    }

    // --- Corners ---

    /// Returns the corner at `point` and whether it was just created.
    ///
    /// With `enable_auto_merge`, the nearest corner within
    /// `corner_tolerance` is reused. Emits `CornerAdded` for a new corner.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `point` is not finite.
    pub fn find_or_create_corner(
        &mut self,
        point: Point2,
        enable_auto_merge: bool,
    ) -> Result<(CornerId, bool)> {
        if !is_finite_point(&point) {
            return Err(
                OperationError::InvalidInput(format!("non-finite corner position {point}")).into(),
            );
        }
        let (id, created) = self.resolve_corner(point, enable_auto_merge);
        if created {
            self.emit_corner(id, TopologyEvent::CornerAdded);
        }
        Ok((id, created))
    }

    fn resolve_corner(&mut self, point: Point2, enable_auto_merge: bool) -> (CornerId, bool) {
        if enable_auto_merge {
            if let Some((id, d)) = self.store.nearest_corner(&point, self.config.corner_tolerance) {
                debug!(?id, distance = d, "merged endpoint into existing corner");
                return (id, false);
            }
        }
        (self.store.add_corner(CornerData::new(point)), true)
    }

    /// Drops corners created for a rejected wall.
    fn discard_orphans(&mut self, candidates: &[(CornerId, bool)]) -> Result<()> {
        for &(id, created) in candidates {
            if created && self.store.corner(id).is_ok_and(|c| c.degree() == 0) {
                self.store.remove_corner(id)?;
            }
        }
        Ok(())
    }

    fn emit_corner(&mut self, id: CornerId, make: fn(CornerDescriptor) -> TopologyEvent) {
        if let Ok(data) = self.store.corner(id) {
            let event = make(CornerDescriptor::new(id, data));
            self.emit(&event);
        }
    }

    fn set_corner_position(&mut self, id: CornerId, position: Point2) -> Result<()> {
        self.store.corner_mut(id)?.position = position;
        self.emit_corner(id, TopologyEvent::CornerMoved);
        Ok(())
    }

    /// Moves a corner; every wall attached to it follows.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::CornerNotFound` for an unknown id, or
    /// `OperationError::InvalidInput` for a non-finite position.
    pub fn move_corner(&mut self, id: CornerId, position: Point2) -> Result<CornerDescriptor> {
        if !is_finite_point(&position) {
            return Err(OperationError::InvalidInput(format!(
                "non-finite corner position {position}"
            ))
            .into());
        }
        self.store.corner(id)?;
        self.set_corner_position(id, position)?;
        self.notify_topology_changed()?;
        self.corner(id)
    }

    /// Translates every corner of the given walls by `delta`, once each.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::WallNotFound` if any id is unknown; nothing
    /// moves in that case.
    pub fn translate_walls(&mut self, ids: &[WallId], delta: Vector2) -> Result<()> {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return Err(OperationError::InvalidInput("non-finite translation".to_owned()).into());
        }
        let mut corners: Vec<CornerId> = Vec::new();
        for &id in ids {
            let wall = self.store.wall(id)?;
            for c in [wall.start, wall.end] {
                if !corners.contains(&c) {
                    corners.push(c);
                }
            }
        }
        for &id in ids {
            if let WallCurve::Bezier { control_points } = &mut self.store.wall_mut(id)?.curve {
                for cp in control_points.iter_mut() {
                    *cp += delta;
                }
            }
        }
        for c in corners {
            let position = self.store.corner(c)?.position + delta;
            self.set_corner_position(c, position)?;
        }
        self.notify_topology_changed()
    }

    // --- Walls ---

    /// Creates a wall between two points.
    ///
    /// Endpoints resolve to corners (merging into nearby ones when enabled).
    /// Returns `Ok(None)` if the endpoints collapse to one corner or lie
    /// closer than `min_wall_length`, or if either point is not finite. If a
    /// wall already joins the two corners, in either direction, that wall is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a non-positive thickness
    /// or height.
    pub fn create_wall(
        &mut self,
        start: Point2,
        end: Point2,
        options: &WallOptions,
    ) -> Result<Option<WallDescriptor>> {
        match self.insert_wall(start, end, options)? {
            Inserted::Rejected => Ok(None),
            Inserted::Existing(desc) => Ok(Some(desc)),
            Inserted::Added(desc) => {
                self.notify_topology_changed()?;
                Ok(Some(desc))
            }
        }
    }

    /// Creates many walls and recomputes rooms once at the end.
    ///
    /// Results are parallel to `requests`, with the same meaning as
    /// [`create_wall`](Self::create_wall).
    ///
    /// # Errors
    ///
    /// Stops at the first request with invalid options. Walls inserted
    /// before it are kept and rooms are recomputed.
    pub fn create_walls(
        &mut self,
        requests: &[WallRequest],
    ) -> Result<Vec<Option<WallDescriptor>>> {
        let mut results = Vec::with_capacity(requests.len());
        let mut added = false;
        let mut failure = None;
        for req in requests {
            match self.insert_wall(req.start, req.end, &req.options) {
                Ok(Inserted::Rejected) => results.push(None),
                Ok(Inserted::Existing(desc)) => results.push(Some(desc)),
                Ok(Inserted::Added(desc)) => {
                    added = true;
                    results.push(Some(desc));
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        if added {
            self.notify_topology_changed()?;
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(results),
        }
    }

    /// Creates four walls enclosing a `width` x `depth` rectangle whose
    /// lower-left corner is `origin`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a side shorter than
    /// `min_wall_length` or invalid wall options.
    pub fn create_rectangular_room(
        &mut self,
        origin: Point2,
        width: f64,
        depth: f64,
        options: &WallOptions,
    ) -> Result<Vec<WallDescriptor>> {
        let min = self.config.min_wall_length;
        if !(width.is_finite() && depth.is_finite() && width >= min && depth >= min) {
            return Err(OperationError::InvalidInput(format!(
                "room of {width} x {depth} is too small"
            ))
            .into());
        }
        let corners = [
            origin,
            Point2::new(origin.x + width, origin.y),
            Point2::new(origin.x + width, origin.y + depth),
            Point2::new(origin.x, origin.y + depth),
        ];
        let requests: Vec<WallRequest> = (0..4)
            .map(|i| WallRequest {
                start: corners[i],
                end: corners[(i + 1) % 4],
                options: options.clone(),
            })
            .collect();
        Ok(self.create_walls(&requests)?.into_iter().flatten().collect())
    }

    fn insert_wall(
        &mut self,
        start: Point2,
        end: Point2,
        options: &WallOptions,
    ) -> Result<Inserted> {
        if !is_finite_point(&start) || !is_finite_point(&end) {
            warn!(?start, ?end, "ignoring wall with non-finite endpoint");
            return Ok(Inserted::Rejected);
        }
        if options
            .bezier_control_points
            .is_some_and(|cps| !cps.iter().all(is_finite_point))
        {
            warn!(?start, ?end, "ignoring wall with non-finite control point");
            return Ok(Inserted::Rejected);
        }
        let thickness = options.thickness.unwrap_or(self.config.default_thickness);
        let height = options.height.unwrap_or(self.config.default_height);
        check_dimension("thickness", thickness)?;
        check_dimension("height", height)?;
        let material = options.material.unwrap_or(self.config.default_material);
        let auto_merge = options
            .enable_auto_merge
            .unwrap_or(self.config.auto_merge_corners);

        let resolved_start = self.resolve_corner(start, auto_merge);
        let resolved_end = self.resolve_corner(end, auto_merge);
        let (start_id, end_id) = (resolved_start.0, resolved_end.0);
        let start_pos = self.store.corner(start_id)?.position;
        let end_pos = self.store.corner(end_id)?.position;

        if start_id == end_id || distance(&start_pos, &end_pos) < self.config.min_wall_length {
            warn!(?start, ?end, "ignoring zero-length wall");
            self.discard_orphans(&[resolved_start, resolved_end])?;
            return Ok(Inserted::Rejected);
        }

        if let Some(existing) = self.store.wall_between(start_id, end_id) {
            debug!(?existing, "wall already joins these corners");
            self.discard_orphans(&[resolved_start, resolved_end])?;
            return Ok(Inserted::Existing(
                self.store.wall_descriptor(existing, self.config.bezier_samples)?,
            ));
        }

        let data = WallData::new(start_id, end_id, options.curve(&start_pos, &end_pos))
            .with_dimensions(thickness, height)
            .with_material(material);
        let id = self.store.add_wall(data)?;

        for (corner, created) in [resolved_start, resolved_end] {
            if created {
                self.emit_corner(corner, TopologyEvent::CornerAdded);
            }
        }
        let desc = self.store.wall_descriptor(id, self.config.bezier_samples)?;
        debug!(?id, length = desc.length, "wall added");
        self.emit(&TopologyEvent::WallAdded(desc.clone()));
        Ok(Inserted::Added(desc))
    }

    /// Updates wall fields.
    ///
    /// A new `length` moves the end corner along the wall when only this
    /// wall uses it, otherwise the start corner when that one is free.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::WallNotFound` for an unknown id, or
    /// `OperationError::InvalidInput` for invalid values, non-finite control
    /// points, a length change on a curved wall, a length change with both
    /// corners shared, or a new size its openings would no longer fit.
    /// Nothing changes when an error is returned.
    pub fn update_wall(&mut self, id: WallId, update: &WallUpdate) -> Result<WallDescriptor> {
        let wall = self.store.wall(id)?;
        let (wall_start, current_curve, current_height) = (wall.start, wall.curve, wall.height);
        if let Some(t) = update.thickness {
            check_dimension("thickness", t)?;
        }
        if let Some(h) = update.height {
            check_dimension("height", h)?;
        }

        let curved = match (update.wall_type, update.bezier_control_points) {
            (Some(WallType::Straight), _) => false,
            (Some(WallType::Curved), _) | (None, Some(_)) => true,
            (None, None) => current_curve != WallCurve::Straight,
        };
        let moved = match update.length {
            Some(_) if curved => {
                return Err(OperationError::InvalidInput(
                    "the length of a curved wall follows its curve".to_owned(),
                )
                .into());
            }
            Some(length) => Some(self.plan_resize(id, length)?),
            None => None,
        };

        let (mut start, mut end) = self.store.wall_endpoints(id)?;
        if let Some((corner, position)) = moved {
            if corner == wall_start {
                start = position;
            } else {
                end = position;
            }
        }
        let curve = match (update.wall_type, update.bezier_control_points) {
            (Some(WallType::Straight), _) => WallCurve::Straight,
            (_, Some(control_points)) => WallCurve::Bezier { control_points },
            (Some(WallType::Curved), None) => match current_curve {
                WallCurve::Straight => WallCurve::bezier_along_chord(&start, &end),
                curved @ WallCurve::Bezier { .. } => curved,
            },
            (None, None) => current_curve,
        };
        if !curve.is_finite() {
            return Err(
                OperationError::InvalidInput("non-finite bezier control point".to_owned()).into(),
            );
        }
        let length = curve.length(&start, &end, self.config.bezier_samples);
        let height = update.height.unwrap_or(current_height);
        self.check_openings_fit(id, length, height)?;

        if let Some((corner, position)) = moved {
            self.set_corner_position(corner, position)?;
        }
        let wall = self.store.wall_mut(id)?;
        if let Some(t) = update.thickness {
            wall.thickness = t;
        }
        wall.height = height;
        if let Some(m) = update.material {
            wall.material = m;
        }
        wall.curve = curve;

        let desc = self.wall(id)?;
        self.emit(&TopologyEvent::WallUpdated(desc.clone()));
        if moved.is_some() {
            self.notify_topology_changed()?;
        }
        Ok(desc)
    }

    /// Works out which corner a length change moves, and where to.
    fn plan_resize(&self, id: WallId, length: f64) -> Result<(CornerId, Point2)> {
        if !length.is_finite() || length < self.config.min_wall_length {
            return Err(
                OperationError::InvalidInput(format!("invalid wall length {length}")).into(),
            );
        }
        let wall = self.store.wall(id)?;
        let (start, end) = self.store.wall_endpoints(id)?;
        let dir = (end - start) / distance(&start, &end);

        if self.store.corner(wall.end)?.degree() == 1 {
            Ok((wall.end, start + dir * length))
        } else if self.store.corner(wall.start)?.degree() == 1 {
            Ok((wall.start, end - dir * length))
        } else {
            Err(OperationError::InvalidInput(
                "cannot resize a wall whose corners are both shared".to_owned(),
            )
            .into())
        }
    }

    /// Removes a wall. Corners left without walls are removed too.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::WallNotFound` if the id is unknown.
    pub fn remove_wall(&mut self, id: WallId) -> Result<()> {
        self.detach_wall(id)?;
        self.notify_topology_changed()
    }

    fn detach_wall(&mut self, id: WallId) -> Result<()> {
        let data = self.store.remove_wall(id)?;
        for &opening in data.openings() {
            self.emit(&TopologyEvent::OpeningRemoved(opening));
        }
        for corner in [data.start, data.end] {
            if self.store.corner(corner).is_ok_and(|c| c.degree() == 0) {
                self.store.remove_corner(corner)?;
                self.emit(&TopologyEvent::CornerRemoved(corner));
            }
        }
        debug!(?id, "wall removed");
        self.emit(&TopologyEvent::WallRemoved(id));
        Ok(())
    }

    /// Removes every wall and corner and ends any drawing session.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store is inconsistent.
    pub fn clear(&mut self) -> Result<()> {
        self.cancel_session();
        let ids: Vec<WallId> = self.store.walls().map(|(id, _)| id).collect();
        for id in ids {
            self.detach_wall(id)?;
        }
        let leftovers: Vec<CornerId> = self.store.corners().map(|(id, _)| id).collect();
        for id in leftovers {
            self.store.remove_corner(id)?;
            self.emit(&TopologyEvent::CornerRemoved(id));
        }
        self.store.clear();
        self.notify_topology_changed()
    }

    // --- Queries ---

    /// The wall nearest to `point`, if its centreline is within `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store is inconsistent.
    pub fn wall_at(&self, point: Point2, tolerance: f64) -> Result<Option<WallHit>> {
        WallAtPoint::new(point, tolerance).execute(&self.store)
    }

    /// Existing walls a segment from `start` to `end` would cross.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store is inconsistent.
    pub fn crossing_walls(&self, start: Point2, end: Point2) -> Result<Vec<WallId>> {
        CrossingWalls::new(start, end, self.config.corner_tolerance).execute(&self.store)
    }

    // --- Rooms ---

    /// Recomputes the room list from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store is inconsistent.
    pub fn update_room_detection(&mut self) -> Result<()> {
        self.notify_topology_changed()
    }

    /// Single entry point after any change to the graph: rebuilds rooms and
    /// reports what appeared, changed shape or disappeared.
    fn notify_topology_changed(&mut self) -> Result<()> {
        let rooms = DetectRooms::new().execute(&self.store)?;

        let previous: HashMap<Vec<WallId>, &Room> =
            self.rooms.iter().map(|r| (r.key(), r)).collect();
        let mut events = Vec::new();
        let mut kept = Vec::new();
        for room in &rooms {
            let key = room.key();
            match previous.get(&key) {
                None => events.push(TopologyEvent::RoomCreated(room.clone())),
                Some(old) if old.geometry_differs(room) => {
                    events.push(TopologyEvent::RoomUpdated(room.clone()));
                }
                Some(_) => {}
            }
            kept.push(key);
        }
        for old in &self.rooms {
            if !kept.contains(&old.key()) {
                events.push(TopologyEvent::RoomRemoved(old.clone()));
            }
        }

        debug!(
            rooms = rooms.len(),
            walls = self.store.wall_count(),
            corners = self.store.corner_count(),
            "rooms recomputed"
        );
        self.rooms = rooms;
        for event in &events {
            self.emit(event);
        }
        Ok(())
    }
}

fn check_dimension(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(OperationError::InvalidInput(format!(
            "wall {name} must be positive, got {value}"
        ))
        .into())
    }
}
