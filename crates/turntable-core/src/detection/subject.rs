use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{Result, TurntableError};
use crate::frame::{BoundingBox, Frame, Point};

use super::config::DetectionConfig;
use super::occupancy::occupancy_weights;

/// Per-frame detection result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Sequence index of the frame this detection came from.
    pub index: usize,
    /// Tight bounding box over every pixel with non-zero occupancy.
    pub bbox: BoundingBox,
    /// Alpha-weighted centroid in frame pixel coordinates.
    pub centroid: Point,
    /// Number of occupied pixels.
    pub area: usize,
}

impl Detection {
    /// Geometric center of the bounding box.
    pub fn bbox_center(&self) -> Point {
        self.bbox.center()
    }
}

/// Detect the foreground subject of a frame.
///
/// The bounding box uses binary occupancy (any alpha > 0), while the
/// centroid is weighted by the actual alpha magnitude.
pub fn detect_subject(frame: &Frame, config: &DetectionConfig) -> Result<Detection> {
    let weights = occupancy_weights(frame, config);
    detect_in_weights(&weights, frame.index).ok_or(TurntableError::NoSubjectDetected {
        index: frame.index,
    })
}

/// Detect the subject in a precomputed occupancy weight map.
///
/// Returns `None` if no pixel has a non-zero weight.
pub fn detect_in_weights(weights: &Array2<f32>, index: usize) -> Option<Detection> {
    let (h, w) = weights.dim();
    if h == 0 || w == 0 {
        return None;
    }

    let stats = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h)
            .into_par_iter()
            .map(|row| RowStats::scan(weights.row(row), row))
            .reduce(RowStats::default, RowStats::merge)
    } else {
        (0..h)
            .map(|row| RowStats::scan(weights.row(row), row))
            .fold(RowStats::default(), RowStats::merge)
    };

    stats.into_detection(index)
}

/// Accumulated occupancy statistics over one or more rows.
#[derive(Clone, Debug)]
struct RowStats {
    min_row: usize,
    max_row: usize,
    min_col: usize,
    max_col: usize,
    count: usize,
    sum_x: f64,
    sum_y: f64,
    sum_w: f64,
}

impl Default for RowStats {
    fn default() -> Self {
        Self {
            min_row: usize::MAX,
            max_row: 0,
            min_col: usize::MAX,
            max_col: 0,
            count: 0,
            sum_x: 0.0,
            sum_y: 0.0,
            sum_w: 0.0,
        }
    }
}

impl RowStats {
    fn scan(row: ArrayView1<f32>, row_idx: usize) -> Self {
        let mut stats = Self::default();
        for (col, &weight) in row.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            let weight = weight as f64;
            stats.min_row = row_idx;
            stats.max_row = row_idx;
            stats.min_col = stats.min_col.min(col);
            stats.max_col = stats.max_col.max(col);
            stats.count += 1;
            stats.sum_x += col as f64 * weight;
            stats.sum_y += row_idx as f64 * weight;
            stats.sum_w += weight;
        }
        stats
    }

    fn merge(a: Self, b: Self) -> Self {
        if a.count == 0 {
            return b;
        }
        if b.count == 0 {
            return a;
        }
        Self {
            min_row: a.min_row.min(b.min_row),
            max_row: a.max_row.max(b.max_row),
            min_col: a.min_col.min(b.min_col),
            max_col: a.max_col.max(b.max_col),
            count: a.count + b.count,
            sum_x: a.sum_x + b.sum_x,
            sum_y: a.sum_y + b.sum_y,
            sum_w: a.sum_w + b.sum_w,
        }
    }

    fn into_detection(self, index: usize) -> Option<Detection> {
        if self.count == 0 || self.sum_w <= 0.0 {
            return None;
        }
        let bbox = BoundingBox::new(
            self.min_col as u32,
            self.min_row as u32,
            (self.max_col - self.min_col + 1) as u32,
            (self.max_row - self.min_row + 1) as u32,
        );
        Some(Detection {
            index,
            bbox,
            centroid: Point::new(self.sum_x / self.sum_w, self.sum_y / self.sum_w),
            area: self.count,
        })
    }
}
