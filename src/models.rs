use image::GrayImage;
use image::imageops::FilterType;
use std::ops::{Add, Sub};

use crate::detection::geometry;

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Midpoint, truncating toward zero
    pub fn midpoint(self, other: Point) -> Point {
        let sum = self + other;
        Point::new(sum.x / 2, sum.y / 2)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<imageproc::point::Point<i32>> for Point {
    fn from(p: imageproc::point::Point<i32>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

/// Closed polygon boundary of one foreground region.
///
/// Points are circular: index arithmetic wraps modulo the point count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at a wrapped index; negative indices count back from the end.
    ///
    /// Panics on an empty contour.
    pub fn at(&self, index: isize) -> Point {
        let len = self.points.len() as isize;
        self.points[index.rem_euclid(len) as usize]
    }

    /// Shoelace area in image coordinates (y down).
    ///
    /// Negative when the boundary runs counter-clockwise on screen.
    pub fn signed_area(&self) -> f64 {
        geometry::signed_area(&self.points)
    }

    /// Enclosed area, always non-negative
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        geometry::bounding_box(&self.points)
    }

    /// Same boundary traversed the other way, keeping the first point in place
    pub fn reversed(mut self) -> Self {
        if self.points.len() > 1 {
            self.points[1..].reverse();
        }
        self
    }
}

impl From<Vec<Point>> for Contour {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// Axis-aligned box in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Last column inside the box
    pub fn right(&self) -> i32 {
        self.x + self.width as i32 - 1
    }

    /// Last row inside the box
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32 - 1
    }
}

/// One extended finger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finger {
    /// Midpoint between the ends of the two straight flanks
    pub root: Point,
    /// Apex of the finger
    pub tip: Point,
}

impl Finger {
    pub fn length(&self) -> f32 {
        geometry::distance(self.root, self.tip)
    }
}

/// An accepted scan window, with the contour points that justified it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerMatch {
    pub finger: Finger,
    /// Scan index of the left base
    pub start: usize,
    pub left_base: Point,
    pub right_base: Point,
    /// Far end of the straight flank before the left base
    pub left_end: Point,
    /// Far end of the straight flank after the right base
    pub right_end: Point,
    pub apex_angle: i32,
    pub left_flank_angle: i32,
    pub right_flank_angle: i32,
    /// Normalized dot product of the two flank directions
    pub parallelism: f32,
}

/// A contour index paired with its enclosed area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedContour {
    pub index: usize,
    pub area: f64,
}

/// A ranked contour together with the fingers found on it
#[derive(Debug, Clone, PartialEq)]
pub struct HandCandidate {
    pub contour: RankedContour,
    pub matches: Vec<FingerMatch>,
}

impl HandCandidate {
    pub fn finger_count(&self) -> usize {
        self.matches.len()
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameResult {
    /// Box around the selected hand, `None` when no contour had fingers
    pub bounding_box: Option<BoundingBox>,
    pub fingers: Vec<Finger>,
    pub matches: Vec<FingerMatch>,
    /// Index of the selected hand in the frame's contour list
    pub hand_index: Option<usize>,
    /// Down-scaled copy of the binary mask
    pub mask: GrayImage,
    pub contour_count: usize,
    pub ranked: [Option<RankedContour>; 2],
}

impl FrameResult {
    /// Package the selected hand for display
    pub fn assemble(
        hand: Option<HandCandidate>,
        contours: &[Contour],
        ranked: [Option<RankedContour>; 2],
        mask: &GrayImage,
        mask_scale: f32,
    ) -> Self {
        let (bounding_box, matches, hand_index) = match hand {
            Some(candidate) => {
                let index = candidate.contour.index;
                let bbox = contours.get(index).and_then(Contour::bounding_box);
                (bbox, candidate.matches, Some(index))
            }
            None => (None, Vec::new(), None),
        };

        Self {
            bounding_box,
            fingers: matches.iter().map(|m| m.finger).collect(),
            matches,
            hand_index,
            mask: scale_mask(mask, mask_scale),
            contour_count: contours.len(),
            ranked,
        }
    }

    pub fn has_hand(&self) -> bool {
        self.bounding_box.is_some()
    }

    pub fn finger_count(&self) -> usize {
        self.fingers.len()
    }
}

/// Resize the mask for diagnostic display, never below 1x1
pub fn scale_mask(mask: &GrayImage, scale: f32) -> GrayImage {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return mask.clone();
    }

    let scaled_w = ((width as f32 * scale).round() as u32).max(1);
    let scaled_h = ((height as f32 * scale).round() as u32).max(1);
    image::imageops::resize(mask, scaled_w, scaled_h, FilterType::Triangle)
}
