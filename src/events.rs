//! Typed change notifications.
//!
//! Handlers are registered per [`EventKind`] and invoked synchronously, in
//! registration order, while the emitting operation is still running. A
//! handler only sees the event by shared reference, so it cannot call back
//! into the service that emitted it.

use crate::math::Point2;
use crate::operations::snap::AlignmentGuide;
use crate::topology::{
    CornerDescriptor, CornerId, OpeningDescriptor, OpeningId, Room, WallDescriptor, WallId,
};

/// Preview of the segment currently being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct WallPreview {
    pub start: Point2,
    pub end: Point2,
    pub length: f64,
    /// Whether the end point was pulled onto an existing corner.
    pub is_snapped: bool,
    pub snap_target: Option<CornerId>,
    /// Axis/diagonal angle the end point was snapped to, in degrees.
    pub snap_angle: Option<f64>,
    pub guides: Vec<AlignmentGuide>,
}

/// Something that changed in the floor plan or the drawing session.
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyEvent {
    WallAdded(WallDescriptor),
    WallUpdated(WallDescriptor),
    WallRemoved(WallId),
    CornerAdded(CornerDescriptor),
    CornerMoved(CornerDescriptor),
    CornerRemoved(CornerId),
    RoomCreated(Room),
    RoomUpdated(Room),
    RoomRemoved(Room),
    OpeningAdded(OpeningDescriptor),
    OpeningRemoved(OpeningId),
    WallPreview(WallPreview),
    WallDrawingStarted { start: Point2 },
    /// Drawing finished; lists the walls committed during the session.
    WallDrawingCompleted { walls: Vec<WallId> },
    WallDrawingCancelled,
}

/// Discriminant of [`TopologyEvent`], used to subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    WallAdded,
    WallUpdated,
    WallRemoved,
    CornerAdded,
    CornerMoved,
    CornerRemoved,
    RoomCreated,
    RoomUpdated,
    RoomRemoved,
    OpeningAdded,
    OpeningRemoved,
    WallPreview,
    WallDrawingStarted,
    WallDrawingCompleted,
    WallDrawingCancelled,
}

impl TopologyEvent {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::WallAdded(_) => EventKind::WallAdded,
            Self::WallUpdated(_) => EventKind::WallUpdated,
            Self::WallRemoved(_) => EventKind::WallRemoved,
            Self::CornerAdded(_) => EventKind::CornerAdded,
            Self::CornerMoved(_) => EventKind::CornerMoved,
            Self::CornerRemoved(_) => EventKind::CornerRemoved,
            Self::RoomCreated(_) => EventKind::RoomCreated,
            Self::RoomUpdated(_) => EventKind::RoomUpdated,
            Self::RoomRemoved(_) => EventKind::RoomRemoved,
            Self::OpeningAdded(_) => EventKind::OpeningAdded,
            Self::OpeningRemoved(_) => EventKind::OpeningRemoved,
            Self::WallPreview(_) => EventKind::WallPreview,
            Self::WallDrawingStarted { .. } => EventKind::WallDrawingStarted,
            Self::WallDrawingCompleted { .. } => EventKind::WallDrawingCompleted,
            Self::WallDrawingCancelled => EventKind::WallDrawingCancelled,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(&TopologyEvent)>;

/// Per-kind handler lists.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(ListenerId, EventKind, Handler)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Creates a bus with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&TopologyEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _, _)| *h != id);
        self.handlers.len() != before
    }

    /// Whether anyone listens for `kind`.
    #[must_use]
    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.handlers.iter().any(|(_, k, _)| *k == kind)
    }

    /// Delivers `event` to every handler registered for its kind.
    pub fn emit(&mut self, event: &TopologyEvent) {
        let kind = event.kind();
        for (_, k, handler) in &mut self.handlers {
            if *k == kind {
                handler(event);
            }
        }
    }
}
