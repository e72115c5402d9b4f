use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use turntable_core::consts::{
    DEFAULT_ALIGNMENT_TOLERANCE, DEFAULT_BACKGROUND_THRESHOLD, DEFAULT_FRAME_PREFIX,
};
use turntable_core::detection::DetectionConfig;
use turntable_core::io::{discover_frames, FrameSource};
use turntable_core::pipeline::config::SequenceConfig;
use turntable_core::pipeline::{PipelineStage, ProgressReporter};
use turntable_core::verify::check_alignment_with_progress;

use crate::progress::BarReporter;
use crate::summary::print_alignment_report;

#[derive(Args)]
pub struct CheckArgs {
    /// Directory holding normalized frames
    pub input: PathBuf,

    /// Maximum centroid spread in pixels
    #[arg(long, default_value_t = DEFAULT_ALIGNMENT_TOLERANCE)]
    pub tolerance: f64,

    /// Luma threshold (0-255) for frames without an alpha channel
    #[arg(long, default_value_t = DEFAULT_BACKGROUND_THRESHOLD)]
    pub threshold: u8,

    /// Frame file name prefix
    #[arg(long, default_value = DEFAULT_FRAME_PREFIX)]
    pub prefix: String,

    /// Frame file extension
    #[arg(long, default_value = "png")]
    pub extension: String,

    /// Exit with an error if the sequence is not aligned
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let sequence_config = SequenceConfig {
        prefix: args.prefix.clone(),
        extension: args.extension.clone(),
    };
    let sequence = discover_frames(&args.input, &sequence_config)
        .with_context(|| format!("Failed to list frames in {}", args.input.display()))?;
    let detection = DetectionConfig {
        background_threshold: args.threshold,
    };

    let reporter = BarReporter::new();
    reporter.begin_stage(PipelineStage::Verifying, Some(sequence.len()));
    let report = check_alignment_with_progress(&sequence, &detection, args.tolerance, |done| {
        reporter.advance(done)
    })?;
    reporter.finish();

    print_alignment_report(&report);

    if args.strict && !report.is_aligned() {
        bail!(
            "{} is not aligned within {:.1} px",
            args.input.display(),
            args.tolerance
        );
    }
    Ok(())
}
