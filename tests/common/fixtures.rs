#![allow(dead_code)]

use handfinder::{Contour, Point};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;

/// Pixel color inside the default skin range (HSV 12, 116, 220)
pub const SKIN: Rgb<u8> = Rgb([220, 160, 120]);
/// Pixel color outside the skin range (blue hue)
pub const BACKGROUND: Rgb<u8> = Rgb([30, 60, 160]);

/// Geometry of the synthetic five-finger hand
pub const HAND_LEFT: i32 = 100;
pub const PALM_TOP: i32 = 200;
pub const PALM_BOTTOM: i32 = 320;
pub const FINGER_WIDTH: i32 = 40;
pub const FINGER_HEIGHT: i32 = 100;
pub const TIP_HEIGHT: i32 = 50;
pub const FINGER_GAP: i32 = 20;
pub const FINGER_COUNT: i32 = 5;

/// Finger spacing that survives the default mask cleanup
pub const WIDE_FINGER_GAP: i32 = 40;

/// Polygon of an upright hand: a palm with five fingers ending in pointed
/// tips (about 57 degrees). Runs counter-clockwise on screen: down the left
/// side, along the bottom, up the right side, then over the fingers from
/// right to left.
pub fn hand_vertices() -> Vec<Point> {
    hand_vertices_with_gap(FINGER_GAP)
}

/// Same hand with `gap` pixels between neighboring fingers and at both sides
pub fn hand_vertices_with_gap(gap: i32) -> Vec<Point> {
    let mut vertices = vec![
        Point::new(HAND_LEFT, PALM_TOP),
        Point::new(HAND_LEFT, PALM_BOTTOM),
        Point::new(hand_right(gap), PALM_BOTTOM),
        Point::new(hand_right(gap), PALM_TOP),
    ];
    let top = PALM_TOP - FINGER_HEIGHT;
    for i in (0..FINGER_COUNT).rev() {
        let left = finger_left(i, gap);
        let right = left + FINGER_WIDTH;
        vertices.extend([
            Point::new(right, PALM_TOP),
            Point::new(right, top),
            Point::new(left + FINGER_WIDTH / 2, top - TIP_HEIGHT),
            Point::new(left, top),
            Point::new(left, PALM_TOP),
        ]);
    }
    vertices
}

/// True fingertip positions, right to left
pub fn hand_tips() -> Vec<Point> {
    hand_tips_with_gap(FINGER_GAP)
}

pub fn hand_tips_with_gap(gap: i32) -> Vec<Point> {
    let tip_y = PALM_TOP - FINGER_HEIGHT - TIP_HEIGHT;
    (0..FINGER_COUNT)
        .rev()
        .map(|i| Point::new(finger_left(i, gap) + FINGER_WIDTH / 2, tip_y))
        .collect()
}

/// Last column of the palm
pub fn hand_right(gap: i32) -> i32 {
    HAND_LEFT + FINGER_COUNT * FINGER_WIDTH + (FINGER_COUNT + 1) * gap
}

fn finger_left(i: i32, gap: i32) -> i32 {
    HAND_LEFT + gap + i * (FINGER_WIDTH + gap)
}

/// Dense outline of the synthetic hand, one point per pixel step
pub fn hand_contour() -> Contour {
    Contour::new(densify(&hand_vertices()))
}

/// Axis-aligned rectangle outline with corners only, counter-clockwise on screen
pub fn square(x: i32, y: i32, size: i32) -> Contour {
    Contour::new(vec![
        Point::new(x, y),
        Point::new(x, y + size),
        Point::new(x + size, y + size),
        Point::new(x + size, y),
    ])
}

/// Interpolate a closed polygon at unit Chebyshev steps
pub fn densify(vertices: &[Point]) -> Vec<Point> {
    let mut points = Vec::new();
    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let steps = dx.abs().max(dy.abs());
        for k in 0..steps {
            let x = a.x as f64 + dx as f64 * k as f64 / steps as f64;
            let y = a.y as f64 + dy as f64 * k as f64 / steps as f64;
            points.push(Point::new(x.round() as i32, y.round() as i32));
        }
    }
    points
}

/// Fill polygons in skin color on a uniform background
pub fn render_silhouettes(width: u32, height: u32, polygons: &[Vec<Point>]) -> RgbImage {
    let mut frame = RgbImage::from_pixel(width, height, BACKGROUND);
    for polygon in polygons {
        let poly: Vec<imageproc::point::Point<i32>> = polygon
            .iter()
            .map(|p| imageproc::point::Point::new(p.x, p.y))
            .collect();
        draw_polygon_mut(&mut frame, &poly, SKIN);
    }
    frame
}

/// Corner list of a filled rectangle spanning `[x0, x1] x [y0, y1]`
pub fn rectangle_vertices(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x0, y1),
        Point::new(x1, y1),
        Point::new(x1, y0),
    ]
}

pub fn distance(a: Point, b: Point) -> f32 {
    (((a.x - b.x).pow(2) + (a.y - b.y).pow(2)) as f32).sqrt()
}
