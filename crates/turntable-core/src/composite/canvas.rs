use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::frame::{BoundingBox, Size};
use crate::transform::Transform;

use super::clip::{clip_to_canvas, Overlap};

/// How much of the subject made it onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The whole resized subject is visible.
    Full,
    /// Part of the subject was cut by the canvas edge.
    Clipped,
    /// Nothing is visible; the canvas is empty.
    OffCanvas,
}

/// A composited output frame.
#[derive(Clone, Debug)]
pub struct Composite {
    pub canvas: RgbaImage,
    pub overlap: Option<Overlap>,
    pub placement: Placement,
}

/// Fully transparent canvas.
pub fn empty_canvas(size: Size) -> RgbaImage {
    RgbaImage::new(size.width, size.height)
}

/// Cut the transform's crop out of `pixels` and resize it to `transform.size`.
pub fn extract_subject(pixels: &RgbaImage, transform: &Transform, filter: FilterType) -> RgbaImage {
    let crop = clamp_crop(transform.crop, pixels.width(), pixels.height());
    let cropped = imageops::crop_imm(pixels, crop.x, crop.y, crop.width, crop.height).to_image();
    if cropped.width() == transform.size.width && cropped.height() == transform.size.height {
        return cropped;
    }
    imageops::resize(
        &cropped,
        transform.size.width,
        transform.size.height,
        filter,
    )
}

fn clamp_crop(crop: BoundingBox, width: u32, height: u32) -> BoundingBox {
    let x = crop.x.min(width.saturating_sub(1));
    let y = crop.y.min(height.saturating_sub(1));
    BoundingBox::new(
        x,
        y,
        crop.width.min(width - x).max(1),
        crop.height.min(height - y).max(1),
    )
}

/// Paste `subject` onto a fresh transparent canvas at `(x, y)`.
///
/// Only the intersection with the canvas is copied, alpha included; every
/// other canvas pixel stays fully transparent.
pub fn composite(subject: &RgbaImage, x: i64, y: i64, canvas_size: Size) -> Composite {
    let mut canvas = empty_canvas(canvas_size);
    let subject_size = Size::new(subject.width(), subject.height());

    let Some(overlap) = clip_to_canvas(x, y, subject_size, canvas_size) else {
        return Composite {
            canvas,
            overlap: None,
            placement: Placement::OffCanvas,
        };
    };

    copy_region(subject, &mut canvas, &overlap);

    let placement = if overlap.src.width == subject_size.width
        && overlap.src.height == subject_size.height
    {
        Placement::Full
    } else {
        Placement::Clipped
    };

    Composite {
        canvas,
        overlap: Some(overlap),
        placement,
    }
}

/// Row-wise copy of the overlap region from `src` into `dst`.
fn copy_region(src: &RgbaImage, dst: &mut RgbaImage, overlap: &Overlap) {
    const CHANNELS: usize = 4;
    let src_stride = src.width() as usize * CHANNELS;
    let dst_stride = dst.width() as usize * CHANNELS;
    let row_bytes = overlap.src.width as usize * CHANNELS;
    let src_buf = src.as_raw();
    let dst_buf: &mut [u8] = dst;

    for row in 0..overlap.src.height as usize {
        let s = (overlap.src.y as usize + row) * src_stride + overlap.src.x as usize * CHANNELS;
        let d = (overlap.dst_y as usize + row) * dst_stride + overlap.dst_x as usize * CHANNELS;
        dst_buf[d..d + row_bytes].copy_from_slice(&src_buf[s..s + row_bytes]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn clipped_paste_copies_only_intersection() {
        let subject = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
        let c = composite(&subject, -4, 7, Size::new(20, 12));

        assert_eq!(c.placement, Placement::Clipped);
        let visible = c.canvas.pixels().filter(|p| p.0[3] != 0).count();
        // 6 columns x 5 rows survive.
        assert_eq!(visible, 30);
        assert_eq!(*c.canvas.get_pixel(0, 7), Rgba([1, 2, 3, 255]));
        assert_eq!(c.canvas.get_pixel(6, 7).0[3], 0);
    }

    #[test]
    fn off_canvas_leaves_canvas_empty() {
        let subject = RgbaImage::from_pixel(5, 5, Rgba([9, 9, 9, 255]));
        let c = composite(&subject, 100, 100, Size::new(20, 20));
        assert_eq!(c.placement, Placement::OffCanvas);
        assert!(c.canvas.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}
