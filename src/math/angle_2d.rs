//! Angle utilities in degrees.
//!
//! Drawing tools think in degrees (snap bands, UI readouts), so everything
//! here takes and returns degrees rather than radians.

use super::Point2;

/// Normalizes an angle to `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Smallest absolute difference between two angles, in `[0, 180]`.
#[must_use]
pub fn angular_difference_degrees(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Direction from `from` toward `to`, in degrees within `[0, 360)`.
#[must_use]
pub fn direction_degrees(from: &Point2, to: &Point2) -> f64 {
    normalize_degrees((to.y - from.y).atan2(to.x - from.x).to_degrees())
}

/// Point at `length` from `origin` along the ray at `angle` degrees.
#[must_use]
pub fn point_at_angle(origin: &Point2, angle: f64, length: f64) -> Point2 {
    let rad = angle.to_radians();
    Point2::new(origin.x + length * rad.cos(), origin.y + length * rad.sin())
}
