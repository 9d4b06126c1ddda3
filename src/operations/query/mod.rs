mod crossing_walls;
mod wall_at_point;

pub use crossing_walls::CrossingWalls;
pub use wall_at_point::{WallAtPoint, WallHit};
