use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::analysis::{analyze_sequence_with_progress, ReferenceGeometry};
use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::error::Result;
use crate::io::image_io::save_canvas;
use crate::io::{discover_frames, FrameSource};

use super::config::{NormalizeConfig, PipelineConfig};
use super::normalize::{normalize_frame, NormalizedFrame};
use super::types::{
    FrameStatus, NoOpReporter, PipelineStage, ProgressReporter, RunReport, RunSummary,
};

/// Run the full two-phase pipeline over a directory of frames.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunReport> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}

/// Run the full pipeline with a thread-safe progress reporter.
///
/// Only configuration errors, an empty input directory, or a missing
/// reference abort the run. Per-frame failures are counted in the summary.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<RunReport> {
    config.normalize.validate()?;

    reporter.begin_stage(PipelineStage::Discovering, None);
    let sequence = discover_frames(&config.input, &config.sequence)?;
    std::fs::create_dir_all(&config.output)?;
    info!(
        frames = sequence.len(),
        input = %config.input.display(),
        output = %config.output.display(),
        "Discovered frame sequence"
    );
    reporter.finish_stage();

    let output_dir = config.output.as_path();
    normalize_sequence(
        &sequence,
        &config.normalize,
        reporter.as_ref(),
        |position, normalized| {
            let path = sequence.output_path(position, output_dir)?;
            save_canvas(&normalized.canvas, &path)
        },
    )
}

/// Analyze the sequence once, then normalize every frame and hand each
/// result to `write`.
///
/// Frames that fail to load, or whose `write` fails, are counted as
/// skipped and the run continues.
pub fn normalize_sequence<W>(
    source: &dyn FrameSource,
    config: &NormalizeConfig,
    reporter: &dyn ProgressReporter,
    write: W,
) -> Result<RunReport>
where
    W: Fn(usize, &NormalizedFrame) -> Result<()> + Send + Sync,
{
    let total = source.len();

    // Phase 1: reference geometry. Must finish before any frame is transformed.
    reporter.begin_stage(PipelineStage::Analyzing, Some(total));
    let geometry = analyze_sequence_with_progress(source, config, |done| reporter.advance(done))?;
    reporter.finish_stage();

    // Phase 2: per-frame transform and composite against the shared geometry.
    reporter.begin_stage(PipelineStage::Normalizing, Some(total));
    let counter = AtomicUsize::new(0);
    let process = |position: usize| {
        let status = process_frame(source, position, &geometry, config, &write);
        let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
        reporter.advance(done);
        (position, status)
    };
    let frames: Vec<(usize, FrameStatus)> = if total >= PARALLEL_FRAME_THRESHOLD {
        (0..total).into_par_iter().map(process).collect()
    } else {
        (0..total).map(process).collect()
    };
    reporter.finish_stage();

    let summary = RunSummary::from_statuses(frames.iter().map(|&(_, s)| s));
    info!(
        total = summary.total,
        processed = summary.processed,
        skipped = summary.skipped,
        degraded = summary.degraded,
        clipped = summary.clipped,
        "Normalization complete"
    );

    Ok(RunReport {
        geometry,
        summary,
        frames,
    })
}

fn process_frame<W>(
    source: &dyn FrameSource,
    position: usize,
    geometry: &ReferenceGeometry,
    config: &NormalizeConfig,
    write: &W,
) -> FrameStatus
where
    W: Fn(usize, &NormalizedFrame) -> Result<()>,
{
    let frame = match source.load(position) {
        Ok(f) => f,
        Err(e) => {
            warn!(position, error = %e, "Skipping unreadable frame");
            return FrameStatus::Skipped;
        }
    };

    let normalized = normalize_frame(&frame, geometry, config);
    drop(frame);

    match write(position, &normalized) {
        Ok(()) => normalized.status,
        Err(e) => {
            warn!(position, index = normalized.index, error = %e, "Failed to write frame");
            FrameStatus::Skipped
        }
    }
}
