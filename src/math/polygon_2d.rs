use super::{distance, normalize_degrees, Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Unsigned polygon area.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Sum of edge lengths, including the closing edge from last to first.
#[must_use]
pub fn polygon_perimeter(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| distance(&points[i], &points[(i + 1) % n]))
        .sum()
}

/// Area-weighted centroid of a simple polygon.
///
/// Falls back to the vertex average when the polygon has (near) zero area.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn polygon_centroid(points: &[Point2]) -> Point2 {
    let n = points.len();
    if n == 0 {
        return Point2::origin();
    }

    let area = signed_area(points);
    if area.abs() < TOLERANCE {
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        return Point2::new(sx / n as f64, sy / n as f64);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    let factor = 1.0 / (6.0 * area);
    Point2::new(cx * factor, cy * factor)
}

/// Returns the indices of `points` ordered by polar angle around `center`.
///
/// Angles are measured in degrees, normalized to `[0, 360)`. The sort is
/// stable, so points at equal angles keep their input order.
#[must_use]
pub fn cyclic_order(points: &[Point2], center: &Point2) -> Vec<usize> {
    let angles: Vec<f64> = points
        .iter()
        .map(|p| normalize_degrees((p.y - center.y).atan2(p.x - center.x).to_degrees()))
        .collect();
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| angles[a].total_cmp(&angles[b]));
    order
}
