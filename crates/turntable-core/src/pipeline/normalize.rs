use image::RgbaImage;
use tracing::{debug, warn};

use crate::analysis::ReferenceGeometry;
use crate::composite::{composite, empty_canvas, extract_subject, Placement};
use crate::detection::{detect_subject, with_synthesized_alpha, Detection};
use crate::frame::Frame;
use crate::transform::{plan_transform, Transform};

use super::config::NormalizeConfig;
use super::types::FrameStatus;

/// One frame after transform and composite.
#[derive(Clone, Debug)]
pub struct NormalizedFrame {
    pub index: usize,
    /// Canvas-sized RGBA output.
    pub canvas: RgbaImage,
    pub status: FrameStatus,
    pub detection: Option<Detection>,
    pub transform: Option<Transform>,
}

/// Detect, plan, resample and composite a single frame.
///
/// Never fails: a frame without a subject, or one whose subject lands
/// entirely off-canvas, produces an empty canvas with a degraded status.
pub fn normalize_frame(
    frame: &Frame,
    geometry: &ReferenceGeometry,
    config: &NormalizeConfig,
) -> NormalizedFrame {
    let canvas_size = config.canvas.size();

    let detection = match detect_subject(frame, &config.detection) {
        Ok(d) => d,
        Err(e) => {
            warn!(index = frame.index, error = %e, "Writing empty canvas");
            return NormalizedFrame {
                index: frame.index,
                canvas: empty_canvas(canvas_size),
                status: FrameStatus::NoSubject,
                detection: None,
                transform: None,
            };
        }
    };

    let transform = plan_transform(&detection, geometry, &config.alignment);
    let pixels = with_synthesized_alpha(frame, &config.detection);
    let subject = extract_subject(&pixels, &transform, config.resample.filter_type());
    let result = composite(&subject, transform.paste_x, transform.paste_y, canvas_size);

    let status = match result.placement {
        Placement::Full => FrameStatus::Placed,
        Placement::Clipped => FrameStatus::Clipped,
        Placement::OffCanvas => {
            warn!(
                index = frame.index,
                paste_x = transform.paste_x,
                paste_y = transform.paste_y,
                "Subject placed entirely off-canvas"
            );
            FrameStatus::OffCanvas
        }
    };

    debug!(
        index = frame.index,
        bbox = %detection.bbox,
        centroid = %detection.centroid,
        size = %transform.size,
        paste_x = transform.paste_x,
        paste_y = transform.paste_y,
        ?status,
        "Frame normalized"
    );

    NormalizedFrame {
        index: frame.index,
        canvas: result.canvas,
        status,
        detection: Some(detection),
        transform: Some(transform),
    }
}
