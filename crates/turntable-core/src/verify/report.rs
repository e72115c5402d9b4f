//! Post-run alignment check.
//!
//! Re-detects the subject in already normalized frames and measures how
//! much its centroid and bounding box wander across the sequence.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::info;

use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::detection::{detect_subject, Detection, DetectionConfig};
use crate::error::{Result, TurntableError};
use crate::io::FrameSource;

/// Where the subject sits in one normalized frame.
#[derive(Clone, Debug)]
pub struct FramePlacement {
    pub position: usize,
    /// `None` if the frame is unreadable or carries no subject.
    pub detection: Option<Detection>,
}

/// Max - min of a quantity across the detected frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spread {
    pub min: f64,
    pub max: f64,
}

impl Spread {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc: Option<Spread>, v| {
            Some(match acc {
                None => Spread { min: v, max: v },
                Some(s) => Spread {
                    min: s.min.min(v),
                    max: s.max.max(v),
                },
            })
        })
    }
}

#[derive(Clone, Debug)]
pub struct AlignmentReport {
    pub frames: Vec<FramePlacement>,
    pub tolerance: f64,
    pub centroid_x: Option<Spread>,
    pub centroid_y: Option<Spread>,
    pub width: Option<Spread>,
    pub height: Option<Spread>,
}

impl AlignmentReport {
    pub fn detected(&self) -> usize {
        self.frames.iter().filter(|f| f.detection.is_some()).count()
    }

    pub fn empty(&self) -> usize {
        self.frames.len() - self.detected()
    }

    /// Both centroid spreads are within tolerance. A sequence with no
    /// detected subject at all is not aligned.
    pub fn is_aligned(&self) -> bool {
        match (self.centroid_x, self.centroid_y) {
            (Some(x), Some(y)) => x.range() <= self.tolerance && y.range() <= self.tolerance,
            _ => false,
        }
    }
}

/// Measure centroid and size variation across a normalized sequence.
pub fn check_alignment(
    source: &dyn FrameSource,
    config: &DetectionConfig,
    tolerance: f64,
) -> Result<AlignmentReport> {
    check_alignment_with_progress(source, config, tolerance, |_| {})
}

pub fn check_alignment_with_progress<F>(
    source: &dyn FrameSource,
    config: &DetectionConfig,
    tolerance: f64,
    on_frame_done: F,
) -> Result<AlignmentReport>
where
    F: Fn(usize) + Send + Sync,
{
    let total = source.len();
    if total == 0 {
        return Err(TurntableError::EmptySequence);
    }

    let counter = AtomicUsize::new(0);
    let inspect = |position: usize| {
        let detection = source
            .load(position)
            .and_then(|frame| detect_subject(&frame, config))
            .ok();
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        on_frame_done(done);
        FramePlacement {
            position,
            detection,
        }
    };
    let frames: Vec<FramePlacement> = if total >= PARALLEL_FRAME_THRESHOLD {
        (0..total).into_par_iter().map(inspect).collect()
    } else {
        (0..total).map(inspect).collect()
    };

    let detections = || frames.iter().filter_map(|f| f.detection.as_ref());
    let report = AlignmentReport {
        centroid_x: Spread::of(detections().map(|d| d.centroid.x)),
        centroid_y: Spread::of(detections().map(|d| d.centroid.y)),
        width: Spread::of(detections().map(|d| d.bbox.width as f64)),
        height: Spread::of(detections().map(|d| d.bbox.height as f64)),
        tolerance,
        frames,
    };

    info!(
        frames = total,
        detected = report.detected(),
        aligned = report.is_aligned(),
        "Alignment check complete"
    );
    Ok(report)
}
