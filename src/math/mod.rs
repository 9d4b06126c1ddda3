pub mod angle_2d;
pub mod bezier_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

pub use angle_2d::{
    angular_difference_degrees, direction_degrees, normalize_degrees, point_at_angle,
};
pub use bezier_2d::{cubic_bezier_length, cubic_bezier_point};
pub use distance_2d::{closest_point_on_segment, distance, point_segment_distance};
pub use intersect_2d::segments_intersect;
pub use polygon_2d::{
    cyclic_order, polygon_area, polygon_centroid, polygon_perimeter, signed_area,
};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` when both coordinates are finite numbers.
#[must_use]
pub fn is_finite_point(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
