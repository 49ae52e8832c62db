use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::morphology::{Mask, grayscale_dilate, grayscale_erode};

use crate::config::{MorphologyConfig, SkinConfig};

const FOREGROUND: u8 = 255;
const BACKGROUND: u8 = 0;

/// Convert an RGB pixel to 8-bit HSV (H in [0, 180])
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(f32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v == 0.0 { 0.0 } else { delta / v * 255.0 };

    let mut h = if delta == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    [(h / 2.0).round() as u8, s.round() as u8, v as u8]
}

/// Binary mask of skin-colored pixels (255 = skin)
pub fn skin_mask(frame: &RgbImage, range: &SkinConfig) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        if range.contains(rgb_to_hsv(*frame.get_pixel(x, y))) {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Plus-shaped structuring element with arms of `radius` pixels
pub fn cross_kernel(radius: u8) -> Mask {
    let center = u32::from(radius);
    let size = 2 * center + 1;
    let image = GrayImage::from_fn(size, size, |x, y| {
        if x == center || y == center {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    });
    Mask::from_image(&image, radius, radius)
}

/// Remove specks around the hand (opening), then fill holes inside it (closing).
///
/// Every erosion and dilation is applied `iterations` times with the cross
/// kernel before switching to the other operation.
pub fn clean_mask(mask: &GrayImage, morphology: &MorphologyConfig) -> GrayImage {
    if morphology.iterations == 0 || morphology.kernel_radius == 0 {
        return mask.clone();
    }

    let kernel = cross_kernel(morphology.kernel_radius);
    let repeat = |image: GrayImage, op: fn(&GrayImage, &Mask) -> GrayImage| {
        (0..morphology.iterations).fold(image, |acc, _| op(&acc, &kernel))
    };

    let opened = repeat(repeat(mask.clone(), grayscale_erode), grayscale_dilate);
    repeat(repeat(opened, grayscale_dilate), grayscale_erode)
}
