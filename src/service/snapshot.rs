use serde::Serialize;

use super::WallService;
use crate::error::{OperationError, Result};
use crate::topology::{CornerDescriptor, OpeningDescriptor, Room, WallDescriptor};

/// Plain-data export of the whole floor plan for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorplanSnapshot {
    pub corners: Vec<CornerDescriptor>,
    pub walls: Vec<WallDescriptor>,
    pub openings: Vec<OpeningDescriptor>,
    pub rooms: Vec<Room>,
}

impl FloorplanSnapshot {
    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| OperationError::Failed(format!("snapshot serialization: {e}")).into())
    }
}

impl WallService {
    /// Captures corners, walls, openings and rooms as they are now.
    #[must_use]
    pub fn snapshot(&self) -> FloorplanSnapshot {
        let openings = self
            .store
            .walls()
            .flat_map(|(_, wall)| wall.openings().iter().copied())
            .filter_map(|id| {
                self.store
                    .opening(id)
                    .ok()
                    .map(|data| OpeningDescriptor::new(id, data))
            })
            .collect();
        FloorplanSnapshot {
            corners: self.corners(),
            walls: self.walls(),
            openings,
            rooms: self.rooms.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::{OpeningSpec, WallOptions};
    use super::*;
    use crate::config::WallConfig;
    use crate::math::Point2;

    #[test]
    fn snapshot_captures_everything() {
        let mut svc = WallService::new(WallConfig::default());
        let walls = svc
            .create_rectangular_room(Point2::new(0.0, 0.0), 4.0, 5.0, &WallOptions::new())
            .unwrap();
        svc.add_opening(walls[0].id, &OpeningSpec::door(2.0)).unwrap();

        let snap = svc.snapshot();
        assert_eq!(snap.corners.len(), 4);
        assert_eq!(snap.walls.len(), 4);
        assert_eq!(snap.openings.len(), 1);
        assert_eq!(snap.rooms.len(), 1);
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let mut svc = WallService::new(WallConfig::default());
        svc.create_wall(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), &WallOptions::new())
            .unwrap();
        let json = svc.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let wall = &value["walls"][0];
        assert_eq!(wall["wallType"], "straight");
        assert_eq!(wall["material"], "concrete");
        assert!(wall["startPoint"].is_array());
        assert!(wall.get("bezierControlPoints").is_none());
    }
}
