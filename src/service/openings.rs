use tracing::debug;

use super::WallService;
use crate::error::{OperationError, Result};
use crate::events::TopologyEvent;
use crate::topology::{OpeningData, OpeningDescriptor, OpeningId, OpeningKind, WallId};

/// Placement request for a door, window or plain opening.
///
/// `offset` is the distance from the wall's start corner to the centre of
/// the opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningSpec {
    pub kind: OpeningKind,
    pub offset: f64,
    pub width: f64,
    pub height: f64,
    pub sill_height: f64,
}

impl OpeningSpec {
    /// A 0.9 x 2.1 m door at floor level.
    #[must_use]
    pub fn door(offset: f64) -> Self {
        Self {
            kind: OpeningKind::Door,
            offset,
            width: 0.9,
            height: 2.1,
            sill_height: 0.0,
        }
    }

    /// A 1.2 x 1.2 m window with a 0.9 m sill.
    #[must_use]
    pub fn window(offset: f64) -> Self {
        Self {
            kind: OpeningKind::Window,
            offset,
            width: 1.2,
            height: 1.2,
            sill_height: 0.9,
        }
    }

    /// A 1.0 x 2.1 m unfilled opening at floor level.
    #[must_use]
    pub fn opening(offset: f64) -> Self {
        Self {
            kind: OpeningKind::Opening,
            offset,
            width: 1.0,
            height: 2.1,
            sill_height: 0.0,
        }
    }

    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn sill_height(mut self, sill_height: f64) -> Self {
        self.sill_height = sill_height;
        self
    }
}

impl WallService {
    /// Cuts an opening into a wall.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::WallNotFound` for an unknown wall, or
    /// `OperationError::InvalidInput` if the opening has a non-positive
    /// size, sticks out of the wall, or overlaps another opening.
    pub fn add_opening(&mut self, wall: WallId, spec: &OpeningSpec) -> Result<OpeningDescriptor> {
        let length = self.store.wall_length(wall, self.config.bezier_samples)?;
        let wall_height = self.store.wall(wall)?.height;
        let data = OpeningData {
            wall,
            kind: spec.kind,
            offset: spec.offset,
            width: spec.width,
            height: spec.height,
            sill_height: spec.sill_height,
        };

        let finite = [data.offset, data.width, data.height, data.sill_height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || data.width <= 0.0 || data.height <= 0.0 || data.sill_height < 0.0 {
            return Err(invalid(format!(
                "opening of {} x {} with sill {} is not a valid size",
                data.width, data.height, data.sill_height
            )));
        }
        check_fit(&data, length, wall_height)?;
        for (other, existing) in self.store.wall_openings(wall)? {
            if existing.overlaps(&data) {
                return Err(invalid(format!("opening overlaps {other:?}")));
            }
        }

        let id = self.store.add_opening(data)?;
        let desc = OpeningDescriptor::new(id, self.store.opening(id)?);
        debug!(?id, ?wall, kind = ?desc.kind, "opening added");
        self.emit(&TopologyEvent::OpeningAdded(desc.clone()));
        Ok(desc)
    }

    /// Checks that every opening of `wall` would still fit a wall of the
    /// given length and height.
    pub(super) fn check_openings_fit(
        &self,
        wall: WallId,
        length: f64,
        height: f64,
    ) -> Result<()> {
        for (_, opening) in self.store.wall_openings(wall)? {
            check_fit(opening, length, height)?;
        }
        Ok(())
    }

    /// Removes an opening.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::OpeningNotFound` if the id is unknown.
    pub fn remove_opening(&mut self, id: OpeningId) -> Result<()> {
        self.store.remove_opening(id)?;
        self.emit(&TopologyEvent::OpeningRemoved(id));
        Ok(())
    }

    /// Openings of a wall, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::WallNotFound` if the wall is unknown.
    pub fn openings(&self, wall: WallId) -> Result<Vec<OpeningDescriptor>> {
        Ok(self
            .store
            .wall_openings(wall)?
            .into_iter()
            .map(|(id, data)| OpeningDescriptor::new(id, data))
            .collect())
    }
}

fn check_fit(data: &OpeningData, length: f64, wall_height: f64) -> Result<()> {
    let (from, to) = data.span();
    if !length.is_finite() || from < 0.0 || to > length {
        return Err(invalid(format!(
            "opening spans {from:.3}..{to:.3} on a wall of length {length:.3}"
        )));
    }
    if data.sill_height + data.height > wall_height {
        return Err(invalid(format!(
            "opening top at {:.3} exceeds wall height {wall_height:.3}",
            data.sill_height + data.height
        )));
    }
    Ok(())
}

fn invalid(msg: String) -> crate::error::FloorplanError {
    OperationError::InvalidInput(msg).into()
}
