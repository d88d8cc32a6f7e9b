use town_nav::geometry::{
    closest_point, closest_point_on_segment, closest_point_on_segments, closest_segment,
    distance_to_segment, is_near_points, is_near_segments, point_in_polygon, polygon_area,
};
use town_nav::Vec2;

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

#[test]
fn projection_clamps_to_segment_ends() {
    let a = v(0.0, 0.0);
    let b = v(10.0, 0.0);
    assert_eq!(closest_point_on_segment(v(5.0, 3.0), a, b), v(5.0, 0.0));
    assert_eq!(closest_point_on_segment(v(-4.0, 1.0), a, b), a);
    assert_eq!(closest_point_on_segment(v(14.0, -1.0), a, b), b);
    assert!((distance_to_segment(v(5.0, 3.0), a, b) - 3.0).abs() < 1e-6);
}

#[test]
fn degenerate_segment_is_a_point() {
    let a = v(2.0, 2.0);
    assert_eq!(closest_point_on_segment(v(9.0, 9.0), a, a), a);
}

#[test]
fn nearest_segment_prefers_earliest_on_ties() {
    let segments = [
        (v(0.0, 1.0), v(10.0, 1.0)),
        (v(0.0, -1.0), v(10.0, -1.0)),
        (v(0.0, 5.0), v(10.0, 5.0)),
    ];
    assert_eq!(closest_segment(v(5.0, 0.0), &segments), Some(0));
    assert_eq!(closest_segment(v(5.0, 4.0), &segments), Some(2));
    assert_eq!(closest_segment(v(5.0, 0.0), &[]), None);
    assert_eq!(
        closest_point_on_segments(v(5.0, 6.0), &segments),
        Some(v(5.0, 5.0))
    );
}

#[test]
fn nearest_point_scan() {
    let points = [v(0.0, 0.0), v(4.0, 0.0), v(-4.0, 0.0)];
    assert_eq!(closest_point(v(3.0, 1.0), &points), Some(v(4.0, 0.0)));
    assert_eq!(closest_point(v(-2.0, 0.0), &points), Some(v(0.0, 0.0)));
    assert_eq!(closest_point(v(0.0, 0.0), &[]), None);
}

#[test]
fn polygon_containment_and_area() {
    let square = [v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)];
    assert!(point_in_polygon(v(5.0, 5.0), &square));
    assert!(!point_in_polygon(v(15.0, 5.0), &square));
    assert!(!point_in_polygon(v(5.0, 5.0), &[]));
    assert!((polygon_area(&square) - 100.0).abs() < 1e-4);

    let clockwise: Vec<Vec2> = square.iter().rev().copied().collect();
    assert!((polygon_area(&clockwise) - 100.0).abs() < 1e-4);
    assert_eq!(polygon_area(&square[..2]), 0.0);

    let l_shape = [
        v(0.0, 0.0),
        v(4.0, 0.0),
        v(4.0, 2.0),
        v(2.0, 2.0),
        v(2.0, 4.0),
        v(0.0, 4.0),
    ];
    assert!((polygon_area(&l_shape) - 12.0).abs() < 1e-4);
    assert!(point_in_polygon(v(1.0, 3.0), &l_shape));
    assert!(!point_in_polygon(v(3.0, 3.0), &l_shape));
}

#[test]
fn nearness_is_strict() {
    let segments = [(v(0.0, 0.0), v(10.0, 0.0))];
    assert!(is_near_segments(v(5.0, 0.5), &segments, 1.0));
    assert!(!is_near_segments(v(5.0, 1.0), &segments, 1.0));

    let points = [v(0.0, 0.0)];
    assert!(is_near_points(v(0.0, 1.5), &points, 2.0));
    assert!(!is_near_points(v(0.0, 2.0), &points, 2.0));
}
