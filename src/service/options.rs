use serde::{Deserialize, Serialize};

use crate::math::Point2;
use crate::topology::{WallCurve, WallMaterial, WallType};

/// Per-wall overrides for [`WallService::create_wall`](super::WallService::create_wall).
///
/// `None` fields fall back to the service configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallOptions {
    pub wall_type: Option<WallType>,
    pub thickness: Option<f64>,
    pub height: Option<f64>,
    pub material: Option<WallMaterial>,
    pub enable_auto_merge: Option<bool>,
    pub bezier_control_points: Option<[Point2; 2]>,
}

impl WallOptions {
    /// Options with every field taken from configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = Some(thickness);
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn material(mut self, material: WallMaterial) -> Self {
        self.material = Some(material);
        self
    }

    #[must_use]
    pub fn auto_merge(mut self, enable: bool) -> Self {
        self.enable_auto_merge = Some(enable);
        self
    }

    /// Makes the wall a Bezier curve through the given control points.
    #[must_use]
    pub fn curved(mut self, control_points: [Point2; 2]) -> Self {
        self.wall_type = Some(WallType::Curved);
        self.bezier_control_points = Some(control_points);
        self
    }

    /// Resolves the plan curve for a wall between `start` and `end`.
    ///
    /// A curved wall without control points starts out along its chord.
    pub(crate) fn curve(&self, start: &Point2, end: &Point2) -> WallCurve {
        match (self.wall_type, self.bezier_control_points) {
            (Some(WallType::Straight), _) | (None, None) => WallCurve::Straight,
            (_, Some(control_points)) => WallCurve::Bezier { control_points },
            (Some(WallType::Curved), None) => WallCurve::bezier_along_chord(start, end),
        }
    }
}

/// Field updates for [`WallService::update_wall`](super::WallService::update_wall).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallUpdate {
    pub thickness: Option<f64>,
    pub height: Option<f64>,
    pub material: Option<WallMaterial>,
    pub wall_type: Option<WallType>,
    pub bezier_control_points: Option<[Point2; 2]>,
    /// Requested length; moves a free corner along the wall direction.
    pub length: Option<f64>,
}

/// One wall of a bulk insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct WallRequest {
    pub start: Point2,
    pub end: Point2,
    pub options: WallOptions,
}

impl WallRequest {
    /// A request using configuration defaults.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            options: WallOptions::default(),
        }
    }
}

/// Trimmed end points for one wall, computed by an external joinery pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustedEndpoints {
    pub start: Point2,
    pub end: Point2,
}
