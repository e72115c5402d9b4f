use serde::{Deserialize, Serialize};

use crate::frame::{BoundingBox, Size};

/// The part of a placed rectangle that falls inside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    /// Visible region in the subject's own coordinates.
    pub src: BoundingBox,
    /// Top-left of the same region in canvas coordinates.
    pub dst_x: u32,
    pub dst_y: u32,
}

impl Overlap {
    pub fn area(&self) -> u64 {
        self.src.area()
    }
}

/// Intersect a `size` rectangle placed at `(x, y)` with a canvas.
///
/// Returns `None` when nothing of the rectangle is visible.
pub fn clip_to_canvas(x: i64, y: i64, size: Size, canvas: Size) -> Option<Overlap> {
    let (sx, dx, w) = clip_axis(x, size.width, canvas.width)?;
    let (sy, dy, h) = clip_axis(y, size.height, canvas.height)?;
    Some(Overlap {
        src: BoundingBox::new(sx, sy, w, h),
        dst_x: dx,
        dst_y: dy,
    })
}

/// One-dimensional clip: `(src_start, dst_start, len)`.
fn clip_axis(pos: i64, len: u32, extent: u32) -> Option<(u32, u32, u32)> {
    let src_start = (-pos).max(0);
    let src_end = (len as i64).min(extent as i64 - pos);
    if src_end <= src_start {
        return None;
    }
    let dst_start = pos.max(0);
    Some((
        src_start as u32,
        dst_start as u32,
        (src_end - src_start) as u32,
    ))
}
