#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use floorplan::math::{distance, Point2};
use floorplan::service::{PointerEvent, WallOptions};
use floorplan::{WallConfig, WallService};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn service() -> WallService {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    WallService::new(WallConfig::default())
}

#[test]
fn five_by_four_room_end_to_end() {
    let mut svc = service();
    let opts = WallOptions::new();
    svc.create_wall(p(0.0, 0.0), p(5.0, 0.0), &opts).unwrap();
    svc.create_wall(p(5.0, 0.0), p(5.0, 4.0), &opts).unwrap();
    svc.create_wall(p(5.0, 4.0), p(0.0, 4.0), &opts).unwrap();
    svc.create_wall(p(0.0, 4.0), p(0.0, 0.0), &opts).unwrap();

    assert_eq!(svc.walls().len(), 4);
    assert_eq!(svc.corners().len(), 4);
    assert_eq!(svc.rooms().len(), 1);
    let room = &svc.rooms()[0];
    assert_relative_eq!(room.area, 20.0, epsilon = 1e-9);
    assert_relative_eq!(room.perimeter, 18.0, epsilon = 1e-9);
    assert_relative_eq!(room.center.x, 2.5, epsilon = 1e-9);
    assert_relative_eq!(room.center.y, 2.0, epsilon = 1e-9);
}

#[test]
fn merge_invariant_holds_for_jittered_input() {
    let mut svc = service();
    let tol = svc.config().corner_tolerance;
    // A 4 x 4 grid of nominal points, each visited several times with a
    // different small offset.
    let jitter = |i: u32| {
        let t = f64::from(i);
        (0.04 * (t * 1.7).sin(), 0.04 * (t * 2.3).cos())
    };
    let mut step = 0_u32;
    for row in 0..4 {
        for col in 0..3 {
            for (a, b) in [((col, row), (col + 1, row)), ((row, col), (row, col + 1))] {
                let (ja, jb) = (jitter(step), jitter(step + 1));
                step += 2;
                let start = p(f64::from(a.0) * 2.0 + ja.0, f64::from(a.1) * 2.0 + ja.1);
                let end = p(f64::from(b.0) * 2.0 + jb.0, f64::from(b.1) * 2.0 + jb.1);
                svc.create_wall(start, end, &WallOptions::new()).unwrap();
            }
        }
    }

    let corners = svc.corners();
    assert_eq!(corners.len(), 16);
    for (i, a) in corners.iter().enumerate() {
        for b in &corners[i + 1..] {
            assert!(distance(&a.position, &b.position) >= tol);
        }
    }
    assert_eq!(svc.walls().len(), 24);
    assert_eq!(svc.rooms().len(), 9);
}

#[test]
fn self_loops_and_duplicates_are_refused() {
    let mut svc = service();
    let opts = WallOptions::new();
    assert!(svc.create_wall(p(1.0, 1.0), p(1.0, 1.0), &opts).unwrap().is_none());
    assert!(svc.create_wall(p(1.0, 1.0), p(1.0, 1.0 + 1e-6), &opts).unwrap().is_none());
    assert!(svc.walls().is_empty());

    let first = svc.create_wall(p(0.0, 0.0), p(3.0, 0.0), &opts).unwrap().unwrap();
    let again = svc.create_wall(p(3.0, 0.0), p(0.0, 0.0), &opts).unwrap().unwrap();
    assert_eq!(first, again);
    assert_eq!(svc.walls().len(), 1);
}

#[test]
fn recomputation_is_idempotent() {
    let mut svc = service();
    svc.create_rectangular_room(p(0.0, 0.0), 4.0, 3.0, &WallOptions::new()).unwrap();
    svc.create_rectangular_room(p(4.0, 0.0), 2.0, 3.0, &WallOptions::new()).unwrap();
    svc.update_room_detection().unwrap();
    let first = svc.rooms().to_vec();
    svc.update_room_detection().unwrap();
    assert_eq!(svc.rooms(), first.as_slice());
    assert_eq!(first.len(), 2);
}

#[test]
fn removal_detaches_corners() {
    let mut svc = service();
    let walls = svc
        .create_rectangular_room(p(0.0, 0.0), 4.0, 3.0, &WallOptions::new())
        .unwrap();
    let id = walls[2].id;
    let [a, b] = walls[2].corners;
    svc.remove_wall(id).unwrap();
    assert!(!svc.corner(a).unwrap().walls.contains(&id));
    assert!(!svc.corner(b).unwrap().walls.contains(&id));
}

#[test]
fn listed_length_matches_endpoint_distance() {
    let mut svc = service();
    let start = p(-1.25, 0.5);
    let end = p(2.0, 3.75);
    let created = svc.create_wall(start, end, &WallOptions::new()).unwrap().unwrap();
    let listed = svc.walls().into_iter().find(|w| w.id == created.id).unwrap();
    assert_relative_eq!(
        listed.length,
        distance(&listed.start_point, &listed.end_point),
        epsilon = 1e-12
    );
    assert_relative_eq!(listed.length, distance(&start, &end), epsilon = 1e-12);
}

#[test]
fn drawing_respects_snap_priorities() {
    let mut svc = service();
    svc.create_wall(p(6.0, 0.0), p(6.0, 3.0), &WallOptions::new()).unwrap();
    svc.start_wall_drawing();
    svc.handle_click(p(0.0, 0.0)).unwrap();

    let a = 2.0_f64.to_radians();
    let preview = svc
        .handle_mouse_move(&PointerEvent::default(), p(4.0 * a.cos(), 4.0 * a.sin()))
        .unwrap();
    assert!(preview.end.y.abs() < f64::EPSILON);
    assert_relative_eq!(preview.end.x, 4.0, epsilon = 1e-9);

    let preview = svc.handle_mouse_move(&PointerEvent::default(), p(5.9, 0.1)).unwrap();
    assert_eq!(preview.end, p(6.0, 0.0));
    assert!(preview.is_snapped);

    let wall = svc.handle_click(p(5.9, 0.1)).unwrap().unwrap();
    assert_eq!(wall.end_point, p(6.0, 0.0));
    assert_eq!(svc.corners().len(), 3);
}
