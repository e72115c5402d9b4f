use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use turntable_core::frame::Frame;

/// Transparent RGBA image with a solid opaque rectangle `(x, y, w, h)`.
pub fn rect_image(width: u32, height: u32, rect: (u32, u32, u32, u32), color: [u8; 3]) -> RgbaImage {
    let (rx, ry, rw, rh) = rect;
    let mut img = RgbaImage::new(width, height);
    for y in ry..(ry + rh).min(height) {
        for x in rx..(rx + rw).min(width) {
            img.put_pixel(x, y, Rgba([color[0], color[1], color[2], 255]));
        }
    }
    img
}

/// Frame with a real alpha channel holding one opaque rectangle.
pub fn rect_frame(index: usize, width: u32, height: u32, rect: (u32, u32, u32, u32)) -> Frame {
    Frame::new(index, rect_image(width, height, rect, [200, 120, 40]), true)
}

/// Frame without alpha: black background, bright rectangle.
pub fn opaque_rect_frame(index: usize, width: u32, height: u32, rect: (u32, u32, u32, u32)) -> Frame {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    let (rx, ry, rw, rh) = rect;
    for y in ry..ry + rh {
        for x in rx..rx + rw {
            img.put_pixel(x, y, Rgba([220, 220, 220, 255]));
        }
    }
    Frame::new(index, img, false)
}

/// Fully transparent frame.
pub fn empty_frame(index: usize, width: u32, height: u32) -> Frame {
    Frame::new(index, RgbaImage::new(width, height), true)
}

/// Write `images` as `frame_000.png`, `frame_001.png`, ... into `dir`.
pub fn write_sequence(dir: &Path, images: &[RgbaImage]) {
    for (i, img) in images.iter().enumerate() {
        img.save(dir.join(format!("frame_{i:03}.png")))
            .expect("write frame");
    }
}

/// Write an RGB (no alpha) frame with a black background and a bright rectangle.
pub fn write_rgb_frame(path: &Path, width: u32, height: u32, rect: (u32, u32, u32, u32)) {
    let (rx, ry, rw, rh) = rect;
    let mut img = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    for y in ry..ry + rh {
        for x in rx..rx + rw {
            img.put_pixel(x, y, Rgb([200, 50, 50]));
        }
    }
    img.save(path).expect("write rgb frame");
}

/// Number of pixels with non-zero alpha.
pub fn visible_pixels(img: &RgbaImage) -> usize {
    img.pixels().filter(|p| p.0[3] > 0).count()
}
