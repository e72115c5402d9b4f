use image::{Rgba, RgbaImage};
use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, OPAQUE_ALPHA};
use crate::frame::Frame;

use super::config::DetectionConfig;

/// BT.601 luma of an RGBA pixel, on the 0-255 scale.
pub fn luma(pixel: &Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
}

/// Per-pixel foreground weight in [0.0, 1.0], shape = (height, width).
///
/// With an alpha channel the weight is `alpha / 255`, so anti-aliased edge
/// pixels contribute proportionally. Without one, pixels whose luma exceeds
/// the background threshold weigh 1.0 and everything else 0.0.
pub fn occupancy_weights(frame: &Frame, config: &DetectionConfig) -> Array2<f32> {
    let (w, h) = (frame.width() as usize, frame.height() as usize);
    let threshold = config.background_threshold as f32;

    Array2::from_shape_fn((h, w), |(row, col)| {
        let pixel = frame.pixels.get_pixel(col as u32, row as u32);
        if frame.has_alpha {
            pixel.0[3] as f32 / 255.0
        } else if luma(pixel) > threshold {
            1.0
        } else {
            0.0
        }
    })
}

/// Binary occupancy: any non-zero weight counts fully.
pub fn occupancy_mask(weights: &Array2<f32>) -> Array2<bool> {
    weights.mapv(|v| v > 0.0)
}

/// Return the frame's pixels with a usable alpha plane.
///
/// Frames that already carry alpha are returned unchanged. Otherwise the
/// alpha of each pixel is synthesized from the luma threshold: opaque when
/// occupied, fully transparent when background.
pub fn with_synthesized_alpha(frame: &Frame, config: &DetectionConfig) -> RgbaImage {
    let mut pixels = frame.pixels.clone();
    if frame.has_alpha {
        return pixels;
    }
    let threshold = config.background_threshold as f32;
    for pixel in pixels.pixels_mut() {
        pixel.0[3] = if luma(pixel) > threshold {
            OPAQUE_ALPHA
        } else {
            0
        };
    }
    pixels
}
