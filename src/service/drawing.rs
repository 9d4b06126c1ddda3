//! Interactive polyline drawing.
//!
//! Drawing mode is switched on with [`WallService::start_wall_drawing`]. The
//! first click opens a session; every further click commits a wall from the
//! current start to the snapped pointer position and continues from there.
//! A session ends on double-click or Enter (completed), Escape or right-click
//! (cancelled), or when a click lands back on the first point after at
//! least two walls (auto-close).

use tracing::{debug, warn};

use super::{WallOptions, WallService};
use crate::error::Result;
use crate::events::{EventKind, TopologyEvent, WallPreview};
use crate::math::{distance, is_finite_point, Point2};
use crate::operations::snap::{AlignmentGuide, AlignmentGuides, AngleSnap, CornerSnap};
use crate::topology::{CornerId, WallDescriptor, WallId};

/// Modifier state accompanying a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerEvent {
    /// Shift forces the segment onto the nearest cardinal direction.
    pub shift_key: bool,
}

impl PointerEvent {
    #[must_use]
    pub fn shift() -> Self {
        Self { shift_key: true }
    }
}

/// Keys the drawing session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other,
}

/// Coarse state of the drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    /// No session; the next click in drawing mode starts one.
    Idle,
    /// A session is open and previews follow the pointer.
    Drawing,
}

/// State of an open drawing session.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSession {
    /// Start of the segment being drawn.
    pub start_point: Point2,
    pub preview_end_point: Point2,
    /// Where the session began; clicking here again closes the loop.
    pub first_point: Point2,
    pub last_committed_end: Option<Point2>,
    pub snap_target: Option<CornerId>,
    pub is_snapped: bool,
    pub snap_angle: Option<f64>,
    pub guides: Vec<AlignmentGuide>,
    /// Walls committed so far, in order.
    pub committed: Vec<WallId>,
}

impl DrawingSession {
    fn new(start: Point2, snap_target: Option<CornerId>) -> Self {
        Self {
            start_point: start,
            preview_end_point: start,
            first_point: start,
            last_committed_end: None,
            snap_target,
            is_snapped: snap_target.is_some(),
            snap_angle: None,
            guides: Vec::new(),
            committed: Vec::new(),
        }
    }

    fn preview(&self) -> WallPreview {
        WallPreview {
            start: self.start_point,
            end: self.preview_end_point,
            length: distance(&self.start_point, &self.preview_end_point),
            is_snapped: self.is_snapped,
            snap_target: self.snap_target,
            snap_angle: self.snap_angle,
            guides: self.guides.clone(),
        }
    }
}

/// Pointer position after snapping.
struct Resolved {
    point: Point2,
    snap_target: Option<CornerId>,
    snap_angle: Option<f64>,
}

impl WallService {
    /// Enables drawing mode. Pointer events are ignored until this is called.
    pub fn start_wall_drawing(&mut self) {
        self.drawing_mode = true;
        debug!("wall drawing enabled");
    }

    /// Disables drawing mode, completing any open session.
    pub fn stop_wall_drawing(&mut self) {
        self.finish_session();
        self.drawing_mode = false;
        debug!("wall drawing disabled");
    }

    #[must_use]
    pub fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    #[must_use]
    pub fn drawing_state(&self) -> DrawingState {
        if self.session.is_some() {
            DrawingState::Drawing
        } else {
            DrawingState::Idle
        }
    }

    /// The open session, if any.
    #[must_use]
    pub fn drawing_session(&self) -> Option<&DrawingSession> {
        self.session.as_ref()
    }

    /// Updates the preview for a pointer at `point` and emits `WallPreview`.
    ///
    /// Returns `None` when no session is open or the point is not finite.
    pub fn handle_mouse_move(
        &mut self,
        event: &PointerEvent,
        point: Point2,
    ) -> Option<WallPreview> {
        let start = self.session.as_ref()?.start_point;
        if !is_finite_point(&point) {
            warn!(?point, "ignoring pointer move with non-finite position");
            return None;
        }
        let resolved = self.resolve_endpoint(&start, point, event.shift_key);
        let guides =
            AlignmentGuides::new(self.config.guide_tolerance).execute(&self.store, &resolved.point);

        let session = self.session.as_mut()?;
        session.preview_end_point = resolved.point;
        session.snap_target = resolved.snap_target;
        session.is_snapped = resolved.snap_target.is_some();
        session.snap_angle = resolved.snap_angle;
        session.guides = guides;
        let preview = session.preview();
        if self.events.has_listeners(EventKind::WallPreview) {
            self.emit(&TopologyEvent::WallPreview(preview.clone()));
        }
        Some(preview)
    }

    /// Handles a click at `point`.
    ///
    /// Without a session this opens one and returns `Ok(None)`. Inside a
    /// session it commits a wall to the snapped endpoint; a degenerate wall
    /// returns `Ok(None)` and leaves the session open.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`create_wall`](WallService::create_wall).
    pub fn handle_mouse_click(
        &mut self,
        event: &PointerEvent,
        point: Point2,
    ) -> Result<Option<WallDescriptor>> {
        if !self.drawing_mode {
            return Ok(None);
        }
        if !is_finite_point(&point) {
            warn!(?point, "ignoring click with non-finite position");
            return Ok(None);
        }
        if self.session.is_none() {
            self.open_session(point);
            return Ok(None);
        }
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };

        let start = session.start_point;
        let first = session.first_point;
        let committed = session.committed.len();
        let end = self.resolve_endpoint(&start, point, event.shift_key).point;
        let closes = committed >= 2 && distance(&end, &first) <= self.config.corner_tolerance;

        let Some(wall) = self.create_wall(start, end, &WallOptions::new())? else {
            return Ok(None);
        };
        let next = if distance(&wall.end_point, &end) <= distance(&wall.start_point, &end) {
            wall.end_point
        } else {
            wall.start_point
        };
        if let Some(session) = self.session.as_mut() {
            if !session.committed.contains(&wall.id) {
                session.committed.push(wall.id);
            }
            session.start_point = next;
            session.preview_end_point = next;
            session.last_committed_end = Some(next);
            session.snap_target = None;
            session.is_snapped = false;
            session.snap_angle = None;
            session.guides.clear();
        }
        if closes {
            debug!("drawing loop closed");
            self.finish_session();
        }
        Ok(Some(wall))
    }

    /// [`handle_mouse_click`](Self::handle_mouse_click) without modifiers.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`create_wall`](WallService::create_wall).
    pub fn handle_click(&mut self, point: Point2) -> Result<Option<WallDescriptor>> {
        self.handle_mouse_click(&PointerEvent::default(), point)
    }

    /// Completes the open session. Returns `false` if there was none.
    pub fn handle_mouse_double_click(&mut self) -> bool {
        self.finish_session()
    }

    /// Cancels the open session. Walls already committed stay.
    pub fn handle_right_click(&mut self) -> bool {
        self.cancel_session()
    }

    /// Escape cancels and Enter completes the open session.
    pub fn handle_key_press(&mut self, key: Key) -> bool {
        match key {
            Key::Escape => self.cancel_session(),
            Key::Enter => self.finish_session(),
            Key::Other => false,
        }
    }

    fn open_session(&mut self, point: Point2) {
        let snapped = CornerSnap::new(self.config.corner_tolerance).execute(&self.store, &point);
        let (start, target) = match snapped {
            Some((id, position)) => (position, Some(id)),
            None => (point, None),
        };
        let session = DrawingSession::new(start, target);
        let preview = session.preview();
        self.session = Some(session);
        debug!(?start, "drawing session started");
        self.emit(&TopologyEvent::WallDrawingStarted { start });
        self.emit(&TopologyEvent::WallPreview(preview));
    }

    fn finish_session(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        debug!(walls = session.committed.len(), "drawing session completed");
        self.emit(&TopologyEvent::WallDrawingCompleted {
            walls: session.committed,
        });
        true
    }

    pub(super) fn cancel_session(&mut self) -> bool {
        if self.session.take().is_none() {
            return false;
        }
        debug!("drawing session cancelled");
        self.emit(&TopologyEvent::WallDrawingCancelled);
        true
    }

    /// Angle snap first, then a nearby corner overrides it.
    fn resolve_endpoint(&self, start: &Point2, raw: Point2, shift: bool) -> Resolved {
        let snapped = CornerSnap::new(self.config.corner_tolerance).execute(&self.store, &raw);
        if let Some((id, position)) = snapped {
            return Resolved {
                point: position,
                snap_target: Some(id),
                snap_angle: None,
            };
        }
        let snapped = if self.config.snap_to_axis || shift {
            AngleSnap::new(self.config.axis_snap_tolerance_deg)
                .force_cardinal(shift)
                .execute(start, &raw)
        } else {
            None
        };
        match snapped {
            Some(s) => Resolved {
                point: s.point,
                snap_target: None,
                snap_angle: Some(s.angle),
            },
            None => Resolved {
                point: raw,
                snap_target: None,
                snap_angle: None,
            },
        }
    }
}
