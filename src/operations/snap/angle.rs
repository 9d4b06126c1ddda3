use tracing::warn;

use crate::math::{
    angular_difference_degrees, direction_degrees, distance, is_finite_point, normalize_degrees,
    point_at_angle, Point2, TOLERANCE,
};

const CARDINALS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
const DIAGONALS: [f64; 4] = [45.0, 135.0, 225.0, 315.0];

/// An end point pulled onto a snapped direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSnapResult {
    pub point: Point2,
    /// Snapped direction in degrees, `[0, 360)`.
    pub angle: f64,
}

/// Snaps a segment direction to the cardinal or diagonal axes.
///
/// Cardinal directions get a wide band (1.3x the base tolerance, at most
/// 45 degrees) and are checked first; diagonals get a narrow band (0.7x, at
/// most 25 degrees). The snapped end point keeps the raw segment length.
#[derive(Debug, Clone, Copy)]
pub struct AngleSnap {
    base_tolerance_deg: f64,
    force_cardinal: bool,
}

impl AngleSnap {
    /// Creates a new `AngleSnap` with the given base tolerance in degrees.
    #[must_use]
    pub fn new(base_tolerance_deg: f64) -> Self {
        Self {
            base_tolerance_deg,
            force_cardinal: false,
        }
    }

    /// Always snap to the nearest cardinal direction (shift held).
    #[must_use]
    pub fn force_cardinal(mut self, force: bool) -> Self {
        self.force_cardinal = force;
        self
    }

    /// Half-width of the band around 0/90/180/270.
    #[must_use]
    pub fn cardinal_tolerance(&self) -> f64 {
        (self.base_tolerance_deg * 1.3).min(45.0)
    }

    /// Half-width of the band around 45/135/225/315.
    #[must_use]
    pub fn diagonal_tolerance(&self) -> f64 {
        (self.base_tolerance_deg * 0.7).min(25.0)
    }

    /// Executes the snap for a segment from `start` toward `raw`.
    ///
    /// Returns `None` when no band matches, the segment has no length, or
    /// either point is not finite.
    #[must_use]
    pub fn execute(&self, start: &Point2, raw: &Point2) -> Option<AngleSnapResult> {
        if !is_finite_point(start) || !is_finite_point(raw) {
            warn!(?start, ?raw, "ignoring angle snap for non-finite point");
            return None;
        }
        let length = distance(start, raw);
        if length < TOLERANCE {
            return None;
        }
        let angle = direction_degrees(start, raw);

        let snapped = if self.force_cardinal {
            Some(normalize_degrees((angle / 90.0).round() * 90.0))
        } else {
            nearest_within(angle, &CARDINALS, self.cardinal_tolerance())
                .or_else(|| nearest_within(angle, &DIAGONALS, self.diagonal_tolerance()))
        }?;

        Some(AngleSnapResult {
            point: ray_point(start, snapped, length),
            angle: snapped,
        })
    }
}

fn nearest_within(angle: f64, candidates: &[f64], tolerance: f64) -> Option<f64> {
    candidates
        .iter()
        .map(|&c| (c, angular_difference_degrees(angle, c)))
        .filter(|&(_, d)| d <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

/// Point along a snapped ray. Cardinal rays are built from exact unit
/// vectors so the off-axis coordinate matches `start` bit for bit.
#[allow(clippy::float_cmp)]
fn ray_point(start: &Point2, angle: f64, length: f64) -> Point2 {
    if angle == 0.0 {
        Point2::new(start.x + length, start.y)
    } else if angle == 90.0 {
        Point2::new(start.x, start.y + length)
    } else if angle == 180.0 {
        Point2::new(start.x - length, start.y)
    } else if angle == 270.0 {
        Point2::new(start.x, start.y - length)
    } else {
        point_at_angle(start, angle, length)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn bands_derive_from_base() {
        let snap = AngleSnap::new(10.0);
        assert!((snap.cardinal_tolerance() - 13.0).abs() < 1e-12);
        assert!((snap.diagonal_tolerance() - 7.0).abs() < 1e-12);
        let wide = AngleSnap::new(80.0);
        assert!((wide.cardinal_tolerance() - 45.0).abs() < 1e-12);
        assert!((wide.diagonal_tolerance() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn two_degrees_off_horizontal_lands_on_zero_ray() {
        let start = Point2::new(1.0, 1.0);
        let raw = Point2::new(
            1.0 + 3.0 * 2.0_f64.to_radians().cos(),
            1.0 + 3.0 * 2.0_f64.to_radians().sin(),
        );
        let res = AngleSnap::new(10.0).execute(&start, &raw).unwrap();
        assert_eq!(res.angle, 0.0);
        assert_eq!(res.point.y, start.y);
        assert!((res.point.x - 4.0).abs() < 1e-9);
    }

    #[test]
    fn cardinal_wins_inside_overlapping_bands() {
        // Base 30: cardinal band 39, diagonal band 21. At 30 degrees both
        // match; the cardinal check runs first.
        let raw = Point2::new(30.0_f64.to_radians().cos(), 30.0_f64.to_radians().sin());
        let res = AngleSnap::new(30.0).execute(&Point2::origin(), &raw).unwrap();
        assert_eq!(res.angle, 0.0);
    }

    #[test]
    fn near_diagonal_snaps_to_45() {
        let raw = Point2::new(43.0_f64.to_radians().cos(), 43.0_f64.to_radians().sin()) * 2.0;
        let res = AngleSnap::new(10.0).execute(&Point2::origin(), &raw).unwrap();
        assert_eq!(res.angle, 45.0);
        assert!((res.point.x - res.point.y).abs() < 1e-12);
    }

    #[test]
    fn between_bands_does_not_snap() {
        let raw = Point2::new(25.0_f64.to_radians().cos(), 25.0_f64.to_radians().sin());
        assert!(AngleSnap::new(10.0).execute(&Point2::origin(), &raw).is_none());
    }

    #[test]
    fn shift_forces_nearest_cardinal() {
        let raw = Point2::new(30.0_f64.to_radians().cos(), 30.0_f64.to_radians().sin());
        let res = AngleSnap::new(10.0)
            .force_cardinal(true)
            .execute(&Point2::origin(), &raw)
            .unwrap();
        assert_eq!(res.angle, 0.0);

        let raw = Point2::new(-0.2, -1.0);
        let res = AngleSnap::new(10.0)
            .force_cardinal(true)
            .execute(&Point2::origin(), &raw)
            .unwrap();
        assert_eq!(res.angle, 270.0);
        assert_eq!(res.point.x, 0.0);
    }

    #[test]
    fn non_finite_input_is_neutral() {
        let snap = AngleSnap::new(10.0);
        assert!(snap.execute(&Point2::origin(), &Point2::new(f64::NAN, 1.0)).is_none());
        assert!(snap.execute(&Point2::origin(), &Point2::origin()).is_none());
    }
}
