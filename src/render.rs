//! Overlay drawing for detected hands.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::models::{FrameResult, Point};

pub const TIP_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const FLANK_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
pub const BASE_COLOR: Rgb<u8> = Rgb([0, 255, 255]);
pub const FLANK_END_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const FINGER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const HAND_BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const SPAN_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

const MARKER_RADIUS: i32 = 10;
const FINGER_THICKNESS: i32 = 10;
const LINE_THICKNESS: i32 = 2;

/// Draw the detection result onto a copy of the frame.
///
/// Each finger gets its flanks, base and flank-end markers, tip and a
/// tip-to-root line; the hand gets its bounding box. The scaled mask is
/// inset at the bottom-right corner and a bar along the top edge shows the
/// scan span in pixels.
pub fn render_overlay(frame: &RgbImage, result: &FrameResult, span: usize) -> RgbImage {
    let mut canvas = frame.clone();

    draw_thick_line(
        &mut canvas,
        Point::new(0, 0),
        Point::new(span as i32, 0),
        SPAN_COLOR,
        LINE_THICKNESS,
    );

    for m in &result.matches {
        let tip = m.finger.tip;
        draw_filled_circle_mut(&mut canvas, (tip.x, tip.y), MARKER_RADIUS, TIP_COLOR);
        for (base, end) in [(m.left_base, m.left_end), (m.right_base, m.right_end)] {
            draw_thick_line(&mut canvas, base, end, FLANK_COLOR, LINE_THICKNESS);
        }

        for (p, color) in [
            (m.left_base, BASE_COLOR),
            (m.right_base, BASE_COLOR),
            (m.left_end, FLANK_END_COLOR),
            (m.right_end, FLANK_END_COLOR),
        ] {
            draw_filled_circle_mut(&mut canvas, (p.x, p.y), MARKER_RADIUS, color);
        }

        draw_thick_line(
            &mut canvas,
            tip,
            m.finger.root,
            FINGER_COLOR,
            FINGER_THICKNESS,
        );
    }

    if let Some(bbox) = result.bounding_box {
        let rect = Rect::at(bbox.x, bbox.y).of_size(bbox.width, bbox.height);
        draw_hollow_rect_mut(&mut canvas, rect, HAND_BOX_COLOR);
        if bbox.width > 2 && bbox.height > 2 {
            let inner = Rect::at(bbox.x + 1, bbox.y + 1)
                .of_size(bbox.width - 2, bbox.height - 2);
            draw_hollow_rect_mut(&mut canvas, inner, HAND_BOX_COLOR);
        }
    }

    inset_mask(&mut canvas, result);
    canvas
}

// Paste the scaled mask at the bottom-right corner, clipped to the canvas
fn inset_mask(canvas: &mut RgbImage, result: &FrameResult) {
    let mask = DynamicImage::ImageLuma8(result.mask.clone()).to_rgb8();
    let x = i64::from(canvas.width()) - i64::from(mask.width());
    let y = i64::from(canvas.height()) - i64::from(mask.height());
    image::imageops::overlay(canvas, &mask, x.max(0), y.max(0));
}

// imageproc lines are one pixel wide; stack parallel offsets for thickness
fn draw_thick_line(
    canvas: &mut RgbImage,
    from: Point,
    to: Point,
    color: Rgb<u8>,
    thickness: i32,
) {
    let half = thickness / 2;
    let horizontal = (to.x - from.x).abs() >= (to.y - from.y).abs();

    for offset in -half..thickness - half {
        let (dx, dy) = if horizontal { (0, offset) } else { (offset, 0) };
        draw_line_segment_mut(
            canvas,
            ((from.x + dx) as f32, (from.y + dy) as f32),
            ((to.x + dx) as f32, (to.y + dy) as f32),
            color,
        );
    }
}
