use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use turntable_core::analysis::analyze_sequence_with_progress;
use turntable_core::io::{discover_frames, FrameSource};
use turntable_core::pipeline::{PipelineStage, ProgressReporter};

use super::run::NormalizeArgs;
use crate::progress::BarReporter;
use crate::summary::print_geometry;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Directory holding the input frames
    pub input: PathBuf,

    /// Save the computed geometry as TOML
    #[arg(long)]
    pub save: Option<PathBuf>,

    #[command(flatten)]
    pub normalize: NormalizeArgs,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = args.normalize.to_config();
    let sequence = discover_frames(&args.input, &args.normalize.sequence())
        .with_context(|| format!("Failed to list frames in {}", args.input.display()))?;

    println!("Analyzing {} frames in {}", sequence.len(), args.input.display());

    let reporter = BarReporter::new();
    reporter.begin_stage(PipelineStage::Analyzing, Some(sequence.len()));
    let geometry = analyze_sequence_with_progress(&sequence, &config, |done| {
        reporter.advance(done)
    })
    .context("Sequence analysis failed")?;
    reporter.finish();

    print_geometry(&geometry);

    if let Some(ref path) = args.save {
        let toml_str = toml::to_string_pretty(&geometry)?;
        std::fs::write(path, toml_str)
            .with_context(|| format!("Failed to write geometry to {}", path.display()))?;
        println!("Geometry saved to {}", path.display());
    }

    Ok(())
}
