use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::debug;
use turntable_core::consts::{
    DEFAULT_ALIGNMENT_TOLERANCE, DEFAULT_FRAME_EXTENSION, DEFAULT_FRAME_PREFIX,
};
use turntable_core::detection::DetectionConfig;
use turntable_core::frame::Point;
use turntable_core::io::{discover_frames, FrameSource};
use turntable_core::pipeline::config::{
    AlignmentPolicy, CanvasConfig, FixedTargetConfig, NormalizeConfig, PipelineConfig,
    ResampleFilter, SequenceConfig, SizingPolicy,
};
use turntable_core::pipeline::{run_pipeline_reported, PipelineStage, ProgressReporter};
use turntable_core::verify::check_alignment_with_progress;

use crate::progress::BarReporter;
use crate::summary::{print_alignment_report, print_pipeline_summary, print_run_report};

#[derive(Clone, ValueEnum)]
pub enum AlignArg {
    /// Alpha-weighted centroid on the anchor (default)
    Centroid,
    /// Bounding-box center on the anchor
    BboxCenter,
    /// Top-left of the subject at --target-x/--target-y
    FixedAbsolute,
}

#[derive(Clone, ValueEnum)]
pub enum SizingArg {
    /// Fit the largest subject of the sequence (default)
    GlobalExtent,
    /// Fit the subject of the reference frame
    ReferenceFrame,
    /// Resize every subject to --target-width x --target-height
    FixedTarget,
}

#[derive(Clone, ValueEnum)]
pub enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

/// Options shared by every command that builds a `NormalizeConfig`.
#[derive(Args)]
pub struct NormalizeArgs {
    /// Canvas width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Empty margin kept around the subject when auto-scaling
    #[arg(long, default_value = "80")]
    pub padding: u32,

    /// Which subject point is aligned to the anchor
    #[arg(long, value_enum, default_value = "centroid")]
    pub align: AlignArg,

    /// How subjects are scaled
    #[arg(long, value_enum, default_value = "global-extent")]
    pub sizing: SizingArg,

    /// Reference frame position (0-based) for reference-frame sizing
    #[arg(long, default_value = "0")]
    pub reference: usize,

    /// Anchor X on the canvas (defaults to canvas center)
    #[arg(long)]
    pub anchor_x: Option<f64>,

    /// Anchor Y on the canvas (defaults to canvas center)
    #[arg(long)]
    pub anchor_y: Option<f64>,

    /// Subject width for fixed-target sizing
    #[arg(long, default_value = "480")]
    pub target_width: u32,

    /// Subject height for fixed-target sizing
    #[arg(long, default_value = "360")]
    pub target_height: u32,

    /// Keep the aspect ratio when resizing to the fixed target
    #[arg(long)]
    pub preserve_aspect: bool,

    /// Canvas X of the subject's top-left for fixed-absolute alignment
    #[arg(long, default_value = "160")]
    pub target_x: i64,

    /// Canvas Y of the subject's top-left for fixed-absolute alignment
    #[arg(long, default_value = "120")]
    pub target_y: i64,

    /// Luma threshold (0-255) for frames without an alpha channel
    #[arg(long, default_value = "10")]
    pub threshold: u8,

    /// Resampling filter
    #[arg(long, value_enum, default_value = "lanczos3")]
    pub filter: FilterArg,

    /// Frame file name prefix
    #[arg(long, default_value = DEFAULT_FRAME_PREFIX)]
    pub prefix: String,

    /// Frame file extension
    #[arg(long, default_value = DEFAULT_FRAME_EXTENSION)]
    pub extension: String,
}

impl NormalizeArgs {
    pub fn to_config(&self) -> NormalizeConfig {
        let alignment = match self.align {
            AlignArg::Centroid => AlignmentPolicy::Centroid,
            AlignArg::BboxCenter => AlignmentPolicy::BboxCenter,
            AlignArg::FixedAbsolute => AlignmentPolicy::FixedAbsolute {
                x: self.target_x,
                y: self.target_y,
            },
        };

        let sizing = match self.sizing {
            SizingArg::GlobalExtent => SizingPolicy::GlobalExtent,
            SizingArg::ReferenceFrame => SizingPolicy::ReferenceFrame,
            SizingArg::FixedTarget => SizingPolicy::FixedTarget(FixedTargetConfig {
                width: self.target_width,
                height: self.target_height,
                preserve_aspect: self.preserve_aspect,
            }),
        };

        let canvas = CanvasConfig {
            width: self.width,
            height: self.height,
        };
        let anchor = match (self.anchor_x, self.anchor_y) {
            (None, None) => None,
            (x, y) => {
                let center = canvas.center();
                Some(Point::new(
                    x.unwrap_or(center.x),
                    y.unwrap_or(center.y),
                ))
            }
        };

        let resample = match self.filter {
            FilterArg::Nearest => ResampleFilter::Nearest,
            FilterArg::Triangle => ResampleFilter::Triangle,
            FilterArg::CatmullRom => ResampleFilter::CatmullRom,
            FilterArg::Gaussian => ResampleFilter::Gaussian,
            FilterArg::Lanczos3 => ResampleFilter::Lanczos3,
        };

        NormalizeConfig {
            canvas,
            padding: self.padding,
            alignment,
            sizing,
            reference_frame: self.reference,
            anchor,
            detection: DetectionConfig {
                background_threshold: self.threshold,
            },
            resample,
        }
    }

    pub fn sequence(&self) -> SequenceConfig {
        SequenceConfig {
            prefix: self.prefix.clone(),
            extension: self.extension.clone(),
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Directory holding the input frames
    pub input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "normalized")]
    pub output: PathBuf,

    /// Pipeline config file (TOML); replaces the flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verify alignment of the written frames afterwards
    #[arg(long)]
    pub check: bool,

    /// Maximum centroid spread in pixels accepted by --check
    #[arg(long, default_value_t = DEFAULT_ALIGNMENT_TOLERANCE)]
    pub tolerance: f64,

    #[command(flatten)]
    pub normalize: NormalizeArgs,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        debug!(path = %config_path.display(), "Loading pipeline config");
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        build_config_from_args(args)?
    };

    print_pipeline_summary(&config);

    let reporter = Arc::new(BarReporter::new());
    let report = run_pipeline_reported(&config, reporter.clone())
        .with_context(|| format!("Failed to normalize {}", config.input.display()))?;
    reporter.finish();

    print_run_report(&report);

    if args.check {
        let output_sequence = SequenceConfig {
            prefix: config.sequence.prefix.clone(),
            extension: "png".to_string(),
        };
        let written = discover_frames(&config.output, &output_sequence)
            .with_context(|| format!("No frames written to {}", config.output.display()))?;
        let reporter = BarReporter::new();
        reporter.begin_stage(PipelineStage::Verifying, Some(written.len()));
        let check = check_alignment_with_progress(
            &written,
            &config.normalize.detection,
            args.tolerance,
            |done| reporter.advance(done),
        )?;
        reporter.finish();
        print_alignment_report(&check);
    }

    println!("\nOutput saved to {}", config.output.display());
    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> Result<PipelineConfig> {
    let input = args
        .input
        .clone()
        .context("An input directory is required unless --config is given")?;
    Ok(PipelineConfig {
        input,
        output: args.output.clone(),
        sequence: args.normalize.sequence(),
        normalize: args.normalize.to_config(),
    })
}
