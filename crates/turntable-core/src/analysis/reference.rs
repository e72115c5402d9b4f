use serde::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::frame::{Point, Size};
use crate::pipeline::config::FixedTargetConfig;

/// How per-frame crop sizes are derived from the analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScaleRule {
    /// One uniform factor for every frame.
    Uniform(f64),
    /// Every crop is resized to the target box.
    FitTarget(FixedTargetConfig),
}

impl std::fmt::Display for ScaleRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform(s) => write!(f, "{s:.4}x"),
            Self::FitTarget(t) => write!(f, "fit {}x{}", t.width, t.height),
        }
    }
}

/// Sequence-global geometry, computed once before any frame is transformed
/// and shared read-only by every per-frame transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceGeometry {
    pub scale: ScaleRule,
    /// Canvas point every subject anchor is aligned to.
    pub anchor: Point,
    /// Subject extent the scale was fitted to (reference bbox or sequence maximum).
    pub extent: Option<Size>,
    /// Detection of the designated reference frame, when one was used.
    pub reference: Option<Detection>,
    pub frames_total: usize,
    /// Frames with a usable subject during analysis, if the policy looked at all of them.
    pub frames_detected: Option<usize>,
}

/// Uniform scale that fits `extent` inside `drawable`.
///
/// `scale = min(drawable_w / extent_w, drawable_h / extent_h)`
pub fn fit_scale(extent: Size, drawable: Size) -> f64 {
    let sx = drawable.width as f64 / extent.width.max(1) as f64;
    let sy = drawable.height as f64 / extent.height.max(1) as f64;
    sx.min(sy)
}
