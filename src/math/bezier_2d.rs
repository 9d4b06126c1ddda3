//! Cubic Bezier helpers for curved walls.
//!
//! A curved wall runs from its start corner `p0` to its end corner `p3`
//! with two control points `c1`, `c2`.

use super::{distance, Point2};

/// Evaluates the cubic Bezier at parameter `t` in `[0, 1]`.
#[must_use]
pub fn cubic_bezier_point(p0: &Point2, c1: &Point2, c2: &Point2, p3: &Point2, t: f64) -> Point2 {
    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;
    Point2::new(
        b0 * p0.x + b1 * c1.x + b2 * c2.x + b3 * p3.x,
        b0 * p0.y + b1 * c1.y + b2 * c2.y + b3 * p3.y,
    )
}

/// Approximates the arc length by summing `samples` chords.
///
/// `samples` of zero is treated as one (the straight chord).
#[must_use]
pub fn cubic_bezier_length(
    p0: &Point2,
    c1: &Point2,
    c2: &Point2,
    p3: &Point2,
    samples: u32,
) -> f64 {
    let n = samples.max(1);
    let mut length = 0.0;
    let mut prev = *p0;
    for i in 1..=n {
        let t = f64::from(i) / f64::from(n);
        let pt = cubic_bezier_point(p0, c1, c2, p3, t);
        length += distance(&prev, &pt);
        prev = pt;
    }
    length
}
