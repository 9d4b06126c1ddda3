//! Draws two rooms sharing a wall, one with the interactive tool and one
//! in bulk, and prints the resulting snapshot as JSON.
//!
//! ```text
//! cargo run --example draw
//! RUST_LOG=floorplan=debug cargo run --example draw
//! ```

use floorplan::math::Point2;
use floorplan::service::{OpeningSpec, PointerEvent, WallOptions};
use floorplan::{EventKind, TopologyEvent, WallConfig, WallService};

fn main() -> floorplan::Result<()> {
    // Default: WARN for everything, INFO for floorplan.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("draw=info".parse().unwrap_or_default())
        .add_directive("floorplan=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut service = WallService::new(WallConfig::default());
    service.add_event_listener(EventKind::RoomCreated, |event| {
        if let TopologyEvent::RoomCreated(room) = event {
            tracing::info!(id = room.id, area = room.area, "room created");
        }
    });

    // Left room drawn with slightly shaky input; snapping cleans it up.
    service.start_wall_drawing();
    let pointer = PointerEvent::default();
    for (x, y) in [(0.0, 0.0), (3.02, 0.1), (3.0, 4.05), (-0.03, 3.96), (0.04, 0.02)] {
        let point = Point2::new(x, y);
        service.handle_mouse_move(&pointer, point);
        service.handle_mouse_click(&pointer, point)?;
    }
    service.stop_wall_drawing();

    // Right room reuses the left room's east wall; put a door through it.
    let walls =
        service.create_rectangular_room(Point2::new(3.0, 0.0), 3.0, 4.0, &WallOptions::new())?;
    if let Some(shared) = walls.last() {
        service.add_opening(shared.id, &OpeningSpec::door(2.0))?;
    }

    println!("{}", service.snapshot().to_json()?);
    Ok(())
}
