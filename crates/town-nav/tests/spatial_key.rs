use std::collections::BTreeSet;

use town_nav::{GridPoint, KeyError, Vec2, VertexKey, AXIS_SCALE, MAX_GRID_COORD};

#[test]
fn neighbouring_grid_points_get_distinct_keys() {
    let mut seen = BTreeSet::new();
    for x in -3..=3 {
        for y in -3..=3 {
            let key = VertexKey::from_grid(x, y).expect("in range");
            assert!(seen.insert(key), "duplicate key for ({x}, {y})");
        }
    }
    assert_eq!(seen.len(), 49);
}

#[test]
fn key_layout_is_axis_major() {
    assert_eq!(VertexKey::from_grid(0, 0).expect("key").get(), 0);
    assert_eq!(VertexKey::from_grid(1, 0).expect("key").get(), AXIS_SCALE);
    assert_eq!(VertexKey::from_grid(2, 7).expect("key").get(), 2 * AXIS_SCALE + 7);
    assert_eq!(VertexKey::from_grid(0, -1).expect("key").get(), -1);
}

#[test]
fn swapped_axes_do_not_collide() {
    let a = VertexKey::from_grid(3, 999).expect("key");
    let b = VertexKey::from_grid(999, 3).expect("key");
    assert_ne!(a, b);
}

#[test]
fn range_is_checked_on_every_axis() {
    assert!(VertexKey::from_grid(MAX_GRID_COORD, -MAX_GRID_COORD).is_ok());
    assert_eq!(
        VertexKey::from_grid(MAX_GRID_COORD + 1, 0),
        Err(KeyError::OutOfRange {
            x: MAX_GRID_COORD + 1,
            y: 0,
            max: MAX_GRID_COORD
        })
    );
    assert!(VertexKey::from_grid(0, -(MAX_GRID_COORD + 1)).is_err());
}

#[test]
fn extremes_stay_ordered_and_distinct() {
    let lo = VertexKey::from_grid(-MAX_GRID_COORD, -MAX_GRID_COORD).expect("key");
    let hi = VertexKey::from_grid(-MAX_GRID_COORD + 1, -MAX_GRID_COORD).expect("key");
    let top = VertexKey::from_grid(-MAX_GRID_COORD, MAX_GRID_COORD).expect("key");
    assert!(lo < top);
    assert!(top < hi);
}

#[test]
fn floor_index_separates_stacked_points() {
    let ground = VertexKey::from_grid3(10, 20, 0).expect("key");
    let first = VertexKey::from_grid3(10, 20, 1).expect("key");
    let next_column = VertexKey::from_grid3(10, 21, 0).expect("key");
    assert_ne!(ground, first);
    assert_ne!(first, next_column);
    assert_eq!(first.get() - ground.get(), 1);
}

#[test]
fn snapping_rounds_to_nearest_grid_point() {
    assert_eq!(
        GridPoint::snap(Vec2::new(9.6, -0.4)).expect("snap"),
        GridPoint::new(10, 0)
    );
    assert_eq!(
        GridPoint::snap(Vec2::new(-2.6, 3.2)).expect("snap"),
        GridPoint::new(-3, 3)
    );
    assert_eq!(
        VertexKey::of(Vec2::new(4.9999, 5.0001)),
        VertexKey::from_grid(5, 5)
    );
}

#[test]
fn non_finite_points_have_no_key() {
    assert!(matches!(
        GridPoint::snap(Vec2::new(f32::INFINITY, 0.0)),
        Err(KeyError::NonFinite { .. })
    ));
    assert!(VertexKey::of(Vec2::new(0.0, f32::NAN)).is_err());
}

#[test]
fn display_formats() {
    assert_eq!(GridPoint::new(3, -4).to_string(), "(3, -4)");
    assert_eq!(VertexKey(42).to_string(), "#42");
}
