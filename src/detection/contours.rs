use image::GrayImage;
use imageproc::contours::BorderType;

use crate::config::Approximation;
use crate::models::{Contour, Point};

/// Trace the outermost borders of every foreground region.
///
/// Borders nested inside holes are dropped. Every returned contour runs
/// counter-clockwise on screen (negative signed area in image coordinates),
/// the orientation under which an upward finger has a positive apex angle.
pub fn find_contours(mask: &GrayImage, approximation: Approximation) -> Vec<Contour> {
    imageproc::contours::find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let points: Vec<Point> = c.points.into_iter().map(Point::from).collect();
            let points = match approximation {
                Approximation::None => points,
                Approximation::Simple => compress_runs(points),
            };
            normalize_orientation(Contour::new(points))
        })
        .filter(|c| !c.is_empty())
        .collect()
}

/// Flip a contour that runs clockwise on screen
pub fn normalize_orientation(contour: Contour) -> Contour {
    if contour.signed_area() > 0.0 {
        contour.reversed()
    } else {
        contour
    }
}

/// Keep only the points where the step direction changes
pub fn compress_runs(points: Vec<Point>) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points;
    }

    let step = |from: Point, to: Point| {
        let d = to - from;
        (d.x.signum(), d.y.signum())
    };

    let kept: Vec<Point> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() { points } else { kept }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn filled_rect(x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        let mut mask = GrayImage::new(80, 60);
        for y in y0..=y1 {
            for x in x0..=x1 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        mask
    }

    #[test]
    fn test_rectangle_contour() {
        let contours = find_contours(&filled_rect(20, 10, 59, 39), Approximation::None);
        assert_eq!(contours.len(), 1);

        let contour = &contours[0];
        let bbox = contour.bounding_box().unwrap();
        assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (20, 10, 40, 30));
        assert!(contour.signed_area() < 0.0);
        assert_eq!(contour.area(), 39.0 * 29.0);
    }

    #[test]
    fn test_simple_approximation_keeps_corners() {
        let contours = find_contours(&filled_rect(20, 10, 59, 39), Approximation::Simple);
        assert_eq!(contours.len(), 1);

        let mut corners = contours[0].points().to_vec();
        corners.sort_by_key(|p| (p.x, p.y));
        assert_eq!(
            corners,
            vec![
                Point::new(20, 10),
                Point::new(20, 39),
                Point::new(59, 10),
                Point::new(59, 39),
            ]
        );
    }

    #[test]
    fn test_hole_borders_are_dropped() {
        let mut mask = filled_rect(10, 10, 69, 49);
        for y in 20..40 {
            for x in 25..55 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
        // island inside the hole
        for y in 27..33 {
            for x in 37..43 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }

        let contours = find_contours(&mask, Approximation::None);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].bounding_box().unwrap().width, 60);
    }

    #[test]
    fn test_empty_mask() {
        assert!(find_contours(&GrayImage::new(16, 16), Approximation::None).is_empty());
    }

    #[test]
    fn test_normalize_orientation() {
        let clockwise = Contour::new(vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        assert!(clockwise.signed_area() > 0.0);

        let normalized = normalize_orientation(clockwise);
        assert!(normalized.signed_area() < 0.0);
        assert_eq!(normalized.at(0), Point::new(0, 0));
    }

    #[test]
    fn test_compress_runs() {
        let points = vec![
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(2, 2),
            Point::new(1, 1),
        ];
        assert_eq!(
            compress_runs(points),
            vec![Point::new(0, 0), Point::new(0, 2), Point::new(2, 2)]
        );
    }
}
