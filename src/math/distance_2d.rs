use super::Point2;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Returns the point of segment `a`→`b` closest to `p`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end resolve to that endpoint.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    Point2::new(a.x + t * dx, a.y + t * dy)
}

/// Returns the minimum distance from `p` to the segment `a`→`b`.
#[must_use]
pub fn point_segment_distance(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    distance(p, &closest_point_on_segment(p, a, b))
}
