use super::{Point2, TOLERANCE};

/// Tests whether segment `p1`→`p2` intersects segment `p3`→`p4`.
///
/// Uses the parametric line form. Parallel and collinear segments (zero
/// denominator) never intersect under this test.
#[must_use]
pub fn segments_intersect(p1: &Point2, p2: &Point2, p3: &Point2, p4: &Point2) -> bool {
    let d1x = p2.x - p1.x;
    let d1y = p2.y - p1.y;
    let d2x = p4.x - p3.x;
    let d2y = p4.y - p3.y;

    let denom = d1x * d2y - d1y * d2x;
    if denom.abs() < TOLERANCE {
        return false;
    }

    let dx = p3.x - p1.x;
    let dy = p3.y - p1.y;
    let t = (dx * d2y - dy * d2x) / denom;
    let u = (dx * d1y - dy * d1x) / denom;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments() {
        assert!(segments_intersect(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)));
    }

    #[test]
    fn disjoint_segments() {
        assert!(!segments_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, -1.0), &p(2.0, 1.0)));
    }

    #[test]
    fn touching_at_endpoint() {
        assert!(segments_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)));
    }

    #[test]
    fn collinear_overlap_is_not_reported() {
        assert!(!segments_intersect(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0)));
    }
}
