//! Per-frame transform planning.
//!
//! A transform crops the frame to the subject's bounding box, resizes the
//! crop, and places it on the canvas. The anchor point of the subject
//! (centroid or bbox center) is mapped through the resize in continuous
//! coordinates, so the anchored point lands on the canvas target to within
//! half a pixel of rounding.

use serde::{Deserialize, Serialize};

use crate::analysis::{ReferenceGeometry, ScaleRule};
use crate::detection::Detection;
use crate::frame::{BoundingBox, Point, Size};
use crate::pipeline::config::{AlignmentPolicy, FixedTargetConfig};

/// Guards `floor` against products like 639.9999999 for an exact 640.
const SIZE_EPSILON: f64 = 1e-9;

/// Crop, resize and placement for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Region of the source frame to cut out.
    pub crop: BoundingBox,
    /// Nominal scale factor. Uniform for auto-scaled policies.
    pub scale: f64,
    /// Dimensions of the crop after resizing.
    pub size: Size,
    /// Canvas position of the resized crop's top-left pixel. May be negative
    /// or beyond the canvas; the compositor clips.
    pub paste_x: i64,
    pub paste_y: i64,
}

impl Transform {
    /// Effective per-axis resize ratios after integer rounding of `size`.
    pub fn ratios(&self) -> (f64, f64) {
        (
            self.size.width as f64 / self.crop.width as f64,
            self.size.height as f64 / self.crop.height as f64,
        )
    }

    /// Map a point in source-frame pixel coordinates onto the canvas.
    pub fn map_point(&self, p: Point) -> Point {
        let local = self.crop.local(p);
        let scaled = scale_local(local, self.ratios());
        Point::new(self.paste_x as f64 + scaled.x, self.paste_y as f64 + scaled.y)
    }
}

/// Plan the transform for one frame against the run's reference geometry.
///
/// Placement outside the canvas is not an error here; clipping is left to
/// the compositor.
pub fn plan_transform(
    detection: &Detection,
    geometry: &ReferenceGeometry,
    alignment: &AlignmentPolicy,
) -> Transform {
    let crop = detection.bbox;
    let (scale, size) = match &geometry.scale {
        ScaleRule::Uniform(s) => (*s, uniform_size(crop, *s)),
        ScaleRule::FitTarget(target) => target_size(crop, target),
    };

    let (paste_x, paste_y) = match alignment {
        AlignmentPolicy::Centroid => anchored_paste(crop, size, detection.centroid, geometry.anchor),
        AlignmentPolicy::BboxCenter => {
            anchored_paste(crop, size, detection.bbox_center(), geometry.anchor)
        }
        AlignmentPolicy::FixedAbsolute { x, y } => (*x, *y),
    };

    Transform {
        crop,
        scale,
        size,
        paste_x,
        paste_y,
    }
}

/// Crop size after a uniform scale, floored so the scaled subject never
/// exceeds the region the scale was fitted to.
pub fn uniform_size(crop: BoundingBox, scale: f64) -> Size {
    Size::new(
        scaled_len(crop.width, scale),
        scaled_len(crop.height, scale),
    )
}

fn scaled_len(len: u32, scale: f64) -> u32 {
    ((len as f64 * scale + SIZE_EPSILON).floor() as u32).max(1)
}

/// Crop size for fixed-target sizing, with the nominal scale it implies.
pub fn target_size(crop: BoundingBox, target: &FixedTargetConfig) -> (f64, Size) {
    let (w, h) = (crop.width as f64, crop.height as f64);
    let (tw, th) = (target.width as f64, target.height as f64);

    if !target.preserve_aspect {
        return ((tw / w).min(th / h), Size::new(target.width, target.height));
    }

    let aspect = w / h;
    if aspect > tw / th {
        // Width is the limiting axis.
        let new_h = ((tw / aspect + SIZE_EPSILON).floor() as u32).min(target.height).max(1);
        (tw / w, Size::new(target.width, new_h))
    } else {
        let new_w = ((th * aspect + SIZE_EPSILON).floor() as u32).min(target.width).max(1);
        (th / h, Size::new(new_w, target.height))
    }
}

/// Paste offset that puts `anchor_in_frame` (after resizing) on `target`.
fn anchored_paste(crop: BoundingBox, size: Size, anchor_in_frame: Point, target: Point) -> (i64, i64) {
    let ratios = (
        size.width as f64 / crop.width as f64,
        size.height as f64 / crop.height as f64,
    );
    let scaled = scale_local(crop.local(anchor_in_frame), ratios);
    (
        (target.x - scaled.x).round() as i64,
        (target.y - scaled.y).round() as i64,
    )
}

/// Scale a crop-local pixel-index position by `ratios`.
///
/// Pixel `i` covers `[i, i + 1)`, so the mapping goes through pixel centers.
fn scale_local(local: Point, ratios: (f64, f64)) -> Point {
    Point::new(
        (local.x + 0.5) * ratios.0 - 0.5,
        (local.y + 0.5) * ratios.1 - 0.5,
    )
}
