use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OperationError;
use crate::math::{cubic_bezier_length, distance, is_finite_point, Point2};

use super::corner::CornerId;
use super::opening::OpeningId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the floor plan store.
    pub struct WallId;
}

/// Whether a wall follows a straight chord or a curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallType {
    #[default]
    Straight,
    Curved,
}

/// Wall build-up material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallMaterial {
    #[default]
    Concrete,
    Brick,
    Wood,
    Steel,
    Glass,
    Drywall,
    Stone,
}

impl WallMaterial {
    /// Lowercase name, as used in serialized descriptors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concrete => "concrete",
            Self::Brick => "brick",
            Self::Wood => "wood",
            Self::Steel => "steel",
            Self::Glass => "glass",
            Self::Drywall => "drywall",
            Self::Stone => "stone",
        }
    }
}

impl fmt::Display for WallMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallMaterial {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concrete" => Ok(Self::Concrete),
            "brick" => Ok(Self::Brick),
            "wood" => Ok(Self::Wood),
            "steel" => Ok(Self::Steel),
            "glass" => Ok(Self::Glass),
            "drywall" => Ok(Self::Drywall),
            "stone" => Ok(Self::Stone),
            other => Err(OperationError::InvalidInput(format!(
                "unknown wall material '{other}'"
            ))),
        }
    }
}

/// The plan curve a wall follows between its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallCurve {
    /// Straight chord from start corner to end corner.
    Straight,
    /// Cubic Bezier with the corners as end points.
    Bezier {
        /// Control points nearest the start and end corner respectively.
        control_points: [Point2; 2],
    },
}

impl WallCurve {
    /// Control points placed at thirds of the chord, which traces the chord
    /// itself until the user bends it.
    #[must_use]
    pub fn bezier_along_chord(start: &Point2, end: &Point2) -> Self {
        let d = end - start;
        Self::Bezier {
            control_points: [start + d / 3.0, start + d * (2.0 / 3.0)],
        }
    }

    /// Length of the curve between `start` and `end`.
    #[must_use]
    pub fn length(&self, start: &Point2, end: &Point2, samples: u32) -> f64 {
        match self {
            Self::Straight => distance(start, end),
            Self::Bezier { control_points } => cubic_bezier_length(
                start,
                &control_points[0],
                &control_points[1],
                end,
                samples,
            ),
        }
    }

    /// Whether every control point is a finite coordinate.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Straight => true,
            Self::Bezier { control_points } => control_points.iter().all(is_finite_point),
        }
    }
}

/// A wall traversed in a given direction, used while tracing loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectedWall {
    /// The wall identifier.
    pub wall: WallId,
    /// If `true`, the wall is traversed start → end; otherwise end → start.
    pub forward: bool,
}

impl DirectedWall {
    /// Creates a new directed wall.
    #[must_use]
    pub fn new(wall: WallId, forward: bool) -> Self {
        Self { wall, forward }
    }
}

/// Data associated with a wall: an edge between two corners.
#[derive(Debug, Clone)]
pub struct WallData {
    /// Start corner of the wall.
    pub start: CornerId,
    /// End corner of the wall.
    pub end: CornerId,
    /// Wall thickness in meters.
    pub thickness: f64,
    /// Wall height in meters.
    pub height: f64,
    /// Build-up material.
    pub material: WallMaterial,
    /// The plan curve.
    pub curve: WallCurve,
    /// Openings cut into this wall.
    pub(crate) openings: Vec<OpeningId>,
}

impl WallData {
    /// Creates a wall between two corners with the given curve.
    ///
    /// Thickness, height and material start at their library defaults and
    /// are usually overwritten right away from configuration.
    #[must_use]
    pub fn new(start: CornerId, end: CornerId, curve: WallCurve) -> Self {
        Self {
            start,
            end,
            thickness: 0.2,
            height: 2.7,
            material: WallMaterial::default(),
            curve,
            openings: Vec::new(),
        }
    }

    /// Sets thickness and height.
    #[must_use]
    pub fn with_dimensions(mut self, thickness: f64, height: f64) -> Self {
        self.thickness = thickness;
        self.height = height;
        self
    }

    /// Sets the material.
    #[must_use]
    pub fn with_material(mut self, material: WallMaterial) -> Self {
        self.material = material;
        self
    }

    /// Straight or curved, derived from the curve.
    #[must_use]
    pub fn wall_type(&self) -> WallType {
        match self.curve {
            WallCurve::Straight => WallType::Straight,
            WallCurve::Bezier { .. } => WallType::Curved,
        }
    }

    /// Bezier control points, present only for curved walls.
    #[must_use]
    pub fn control_points(&self) -> Option<[Point2; 2]> {
        match self.curve {
            WallCurve::Straight => None,
            WallCurve::Bezier { control_points } => Some(control_points),
        }
    }

    /// Given one endpoint, returns the other. `None` if `corner` is not an endpoint.
    #[must_use]
    pub fn opposite_corner(&self, corner: CornerId) -> Option<CornerId> {
        if corner == self.start {
            Some(self.end)
        } else if corner == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    /// Whether this wall joins `a` and `b`, in either direction.
    #[must_use]
    pub fn connects(&self, a: CornerId, b: CornerId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// Corner a directed traversal of this wall starts from.
    #[must_use]
    pub fn tail(&self, forward: bool) -> CornerId {
        if forward {
            self.start
        } else {
            self.end
        }
    }

    /// Corner a directed traversal of this wall arrives at.
    #[must_use]
    pub fn head(&self, forward: bool) -> CornerId {
        if forward {
            self.end
        } else {
            self.start
        }
    }

    /// Wall length given its corner positions.
    ///
    /// Straight walls measure the chord; curved walls sum `samples` chords
    /// along the Bezier.
    #[must_use]
    pub fn length(&self, start: &Point2, end: &Point2, samples: u32) -> f64 {
        self.curve.length(start, end, samples)
    }

    /// Openings cut into this wall.
    #[must_use]
    pub fn openings(&self) -> &[OpeningId] {
        &self.openings
    }
}

/// Plain-data view of a wall handed to rendering collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallDescriptor {
    pub id: WallId,
    pub start_point: Point2,
    pub end_point: Point2,
    pub length: f64,
    pub thickness: f64,
    pub height: f64,
    pub wall_type: WallType,
    pub material: WallMaterial,
    /// Start and end corner ids.
    pub corners: [CornerId; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bezier_control_points: Option<[Point2; 2]>,
    pub openings: Vec<OpeningId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn two_corners() -> (CornerId, CornerId, CornerId) {
        let mut keys: SlotMap<CornerId, ()> = SlotMap::with_key();
        (keys.insert(()), keys.insert(()), keys.insert(()))
    }

    #[test]
    fn opposite_corner_both_ways() {
        let (a, b, c) = two_corners();
        let wall = WallData::new(a, b, WallCurve::Straight);
        assert_eq!(wall.opposite_corner(a), Some(b));
        assert_eq!(wall.opposite_corner(b), Some(a));
        assert_eq!(wall.opposite_corner(c), None);
    }

    #[test]
    fn connects_is_undirected() {
        let (a, b, c) = two_corners();
        let wall = WallData::new(a, b, WallCurve::Straight);
        assert!(wall.connects(a, b));
        assert!(wall.connects(b, a));
        assert!(!wall.connects(a, c));
    }

    #[test]
    fn straight_length_is_chord() {
        let (a, b, _) = two_corners();
        let wall = WallData::new(a, b, WallCurve::Straight);
        let len = wall.length(&Point2::new(0.0, 0.0), &Point2::new(3.0, 4.0), 24);
        assert!((len - 5.0).abs() < 1e-12);
        assert_eq!(wall.wall_type(), WallType::Straight);
        assert!(wall.control_points().is_none());
    }

    #[test]
    fn chord_bezier_matches_straight_length() {
        let (a, b, _) = two_corners();
        let s = Point2::new(1.0, 1.0);
        let e = Point2::new(7.0, 1.0);
        let wall = WallData::new(a, b, WallCurve::bezier_along_chord(&s, &e));
        assert_eq!(wall.wall_type(), WallType::Curved);
        assert!((wall.length(&s, &e, 16) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn material_parses_case_insensitively() {
        assert_eq!("Brick".parse::<WallMaterial>().unwrap(), WallMaterial::Brick);
        assert_eq!(WallMaterial::Drywall.to_string(), "drywall");
        assert!("marshmallow".parse::<WallMaterial>().is_err());
    }

    #[test]
    fn directed_wall_head_and_tail() {
        let (a, b, _) = two_corners();
        let wall = WallData::new(a, b, WallCurve::Straight);
        assert_eq!(wall.tail(true), a);
        assert_eq!(wall.head(true), b);
        assert_eq!(wall.tail(false), b);
        assert_eq!(wall.head(false), a);
    }

    #[test]
    fn curve_finiteness_checks_control_points() {
        assert!(WallCurve::Straight.is_finite());
        let bent = WallCurve::Bezier {
            control_points: [Point2::new(1.0, 1.0), Point2::new(2.0, 1.0)],
        };
        assert!(bent.is_finite());
        let broken = WallCurve::Bezier {
            control_points: [Point2::new(f64::NAN, 1.0), Point2::new(2.0, 1.0)],
        };
        assert!(!broken.is_finite());
    }
}
