//! Planar helpers shared by the road graph and the agents that walk onto it.

use crate::Vec2;

/// Closest point to `p` on segment `a`-`b`, clamping the projection to the endpoints.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let denom = ab.length_squared();
    if denom <= f32::EPSILON {
        return a;
    }
    let t = (p - a).dot(ab) / denom;
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a + ab * t
    }
}

pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Index of the segment nearest to `p`. Ties keep the earliest segment.
pub fn closest_segment(p: Vec2, segments: &[(Vec2, Vec2)]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, (a, b)) in segments.iter().enumerate() {
        let d = distance_to_segment(p, *a, *b);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Projection of `p` onto the nearest of `segments`.
pub fn closest_point_on_segments(p: Vec2, segments: &[(Vec2, Vec2)]) -> Option<Vec2> {
    let (a, b) = segments[closest_segment(p, segments)?];
    Some(closest_point_on_segment(p, a, b))
}

/// Nearest of `points` to `p`. Ties keep the earliest point.
pub fn closest_point(p: Vec2, points: &[Vec2]) -> Option<Vec2> {
    let mut best: Option<(Vec2, f32)> = None;
    for q in points.iter().copied() {
        let d2 = p.distance_squared(q);
        match best {
            Some((_, best_d2)) if d2 >= best_d2 => {}
            _ => best = Some((q, d2)),
        }
    }
    best.map(|(q, _)| q)
}

/// Even-odd containment test against a closed polygon given as ordered vertices.
pub fn point_in_polygon(p: Vec2, polygon: &[Vec2]) -> bool {
    let Some(mut prev) = polygon.last().copied() else {
        return false;
    };
    let mut inside = false;
    for cur in polygon.iter().copied() {
        if (cur.y > p.y) != (prev.y > p.y) {
            let x_cross = (prev.x - cur.x) * (p.y - cur.y) / (prev.y - cur.y) + cur.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        prev = cur;
    }
    inside
}

/// Unsigned area of a simple polygon (shoelace formula).
pub fn polygon_area(polygon: &[Vec2]) -> f32 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    (twice * 0.5).abs()
}

/// Whether `p` lies strictly closer than `tolerance` to any segment.
pub fn is_near_segments(p: Vec2, segments: &[(Vec2, Vec2)], tolerance: f32) -> bool {
    segments
        .iter()
        .any(|(a, b)| distance_to_segment(p, *a, *b) < tolerance)
}

/// Whether `p` lies strictly closer than `tolerance` to any point.
pub fn is_near_points(p: Vec2, points: &[Vec2], tolerance: f32) -> bool {
    points.iter().any(|q| p.distance(*q) < tolerance)
}
