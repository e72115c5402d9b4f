use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::detection::{detect_subject, Detection, DetectionConfig};
use crate::error::{Result, TurntableError};
use crate::frame::Size;
use crate::io::FrameSource;
use crate::pipeline::config::{NormalizeConfig, SizingPolicy};

use super::reference::{fit_scale, ReferenceGeometry, ScaleRule};

/// Derive the sequence-global reference geometry.
///
/// Runs to completion before any frame is transformed. Depending on the
/// sizing policy this looks at the reference frame only, at every frame,
/// or (fixed target size) at none.
pub fn analyze_sequence(
    source: &dyn FrameSource,
    config: &NormalizeConfig,
) -> Result<ReferenceGeometry> {
    analyze_sequence_with_progress(source, config, |_| {})
}

/// Same as [`analyze_sequence`], calling `on_frame_done(items_done)` as frames are inspected.
pub fn analyze_sequence_with_progress<F>(
    source: &dyn FrameSource,
    config: &NormalizeConfig,
    on_frame_done: F,
) -> Result<ReferenceGeometry>
where
    F: Fn(usize) + Send + Sync,
{
    config.validate()?;
    let total = source.len();
    if total == 0 {
        return Err(TurntableError::EmptySequence);
    }
    let anchor = config.target_anchor();

    let geometry = match &config.sizing {
        SizingPolicy::ReferenceFrame => {
            let reference = detect_reference(source, config.reference_frame, &config.detection)?;
            on_frame_done(1);
            let extent = Size::new(reference.bbox.width, reference.bbox.height);
            let scale = fit_scale(extent, config.drawable_area()?);
            ReferenceGeometry {
                scale: ScaleRule::Uniform(scale),
                anchor,
                extent: Some(extent),
                reference: Some(reference),
                frames_total: total,
                frames_detected: None,
            }
        }
        SizingPolicy::GlobalExtent => {
            let detections = detect_all(source, &config.detection, on_frame_done);
            let detected = detections.iter().flatten().count();
            let extent = max_extent(&detections).ok_or(TurntableError::ReferenceNotFound)?;
            let scale = fit_scale(extent, config.drawable_area()?);
            ReferenceGeometry {
                scale: ScaleRule::Uniform(scale),
                anchor,
                extent: Some(extent),
                reference: None,
                frames_total: total,
                frames_detected: Some(detected),
            }
        }
        SizingPolicy::FixedTarget(target) => ReferenceGeometry {
            scale: ScaleRule::FitTarget(target.clone()),
            anchor,
            extent: None,
            reference: None,
            frames_total: total,
            frames_detected: None,
        },
    };

    info!(
        sizing = %config.sizing,
        scale = %geometry.scale,
        anchor = %geometry.anchor,
        extent = ?geometry.extent,
        frames = total,
        "Reference geometry computed"
    );
    Ok(geometry)
}

/// Detect the subject of the designated reference frame.
///
/// Any failure to obtain a detection here is fatal: without it there is
/// nothing to align against.
fn detect_reference(
    source: &dyn FrameSource,
    position: usize,
    config: &DetectionConfig,
) -> Result<Detection> {
    let total = source.len();
    if position >= total {
        return Err(TurntableError::ReferenceIndexOutOfRange {
            index: position,
            total,
        });
    }
    let frame = source.load(position).map_err(|e| {
        warn!(position, error = %e, "Reference frame unreadable");
        TurntableError::ReferenceNotFound
    })?;
    let detection = detect_subject(&frame, config).map_err(|_| {
        warn!(position, index = frame.index, "No subject in reference frame");
        TurntableError::ReferenceNotFound
    })?;
    debug!(
        bbox = %detection.bbox,
        centroid = %detection.centroid,
        "Reference subject detected"
    );
    Ok(detection)
}

/// Detect the subject in every frame. Unreadable or empty frames yield `None`.
pub fn detect_all<F>(
    source: &dyn FrameSource,
    config: &DetectionConfig,
    on_frame_done: F,
) -> Vec<Option<Detection>>
where
    F: Fn(usize) + Send + Sync,
{
    let counter = AtomicUsize::new(0);
    let detect_one = |position: usize| {
        let result = source
            .load(position)
            .and_then(|frame| detect_subject(&frame, config));
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        on_frame_done(done);
        match result {
            Ok(d) => Some(d),
            Err(e) => {
                debug!(position, error = %e, "Frame excluded from extent");
                None
            }
        }
    };

    let total = source.len();
    if total >= PARALLEL_FRAME_THRESHOLD {
        (0..total).into_par_iter().map(detect_one).collect()
    } else {
        (0..total).map(detect_one).collect()
    }
}

/// Largest subject width and height observed across the detections.
pub fn max_extent(detections: &[Option<Detection>]) -> Option<Size> {
    detections
        .iter()
        .flatten()
        .map(|d| Size::new(d.bbox.width, d.bbox.height))
        .reduce(|a, b| Size::new(a.width.max(b.width), a.height.max(b.height)))
}
