//! Geometric primitives used by the finger scan and the ranker

use crate::models::{BoundingBox, Point};

/// Euclidean distance in pixels
pub fn distance(p1: Point, p2: Point) -> f32 {
    let dx = (p1.x - p2.x) as f32;
    let dy = (p1.y - p2.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

// Float error tolerated before truncation, so an exact 90 never reads as 89
const ANGLE_SNAP: f64 = 1e-9;

/// Signed angle at `b` from ray `b→a` to ray `b→c`, in whole degrees.
///
/// The y axis is flipped so angles follow the usual counter-clockwise
/// convention on screen. The difference of the two ray directions is
/// truncated toward zero and reduced with a sign-preserving remainder, so the
/// result lies in (-360, 360).
pub fn three_point_angle(a: Point, b: Point, c: Point) -> i32 {
    let rad1 = ((b.y - a.y) as f64).atan2((a.x - b.x) as f64);
    let rad2 = ((b.y - c.y) as f64).atan2((c.x - b.x) as f64);
    let degrees = (rad1 - rad2).to_degrees();
    let nearest = degrees.round();
    let degrees = if (degrees - nearest).abs() < ANGLE_SNAP {
        nearest
    } else {
        degrees
    };
    degrees as i32 % 360
}

/// Dot product of the unit vectors `e1→s1` and `e2→s2`.
///
/// `None` if either vector has zero length.
pub fn normalized_dot(s1: Point, e1: Point, s2: Point, e2: Point) -> Option<f32> {
    let n1 = distance(s1, e1);
    let n2 = distance(s2, e2);
    if n1 == 0.0 || n2 == 0.0 {
        return None;
    }

    let v1 = s1 - e1;
    let v2 = s2 - e2;
    let (x1, y1) = (v1.x as f32 / n1, v1.y as f32 / n1);
    let (x2, y2) = (v2.x as f32 / n2, v2.y as f32 / n2);
    Some(x1 * x2 + y1 * y2)
}

/// Shoelace area of a closed polygon in image coordinates
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let twice: i64 = (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64
        })
        .sum();
    twice as f64 / 2.0
}

/// Smallest axis-aligned box containing every point
pub fn bounding_box(points: &[Point]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Some(BoundingBox {
        x: min_x,
        y: min_y,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    })
}
