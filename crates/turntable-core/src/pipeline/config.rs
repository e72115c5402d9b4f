use std::path::PathBuf;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_FRAME_EXTENSION, DEFAULT_FRAME_PREFIX,
    DEFAULT_PADDING, DEFAULT_TARGET_HEIGHT, DEFAULT_TARGET_WIDTH, DEFAULT_TARGET_X,
    DEFAULT_TARGET_Y,
};
use crate::detection::DetectionConfig;
use crate::error::{Result, TurntableError};
use crate::frame::{Point, Size};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the input frames.
    pub input: PathBuf,
    /// Directory the normalized frames are written to.
    pub output: PathBuf,
    #[serde(default)]
    pub sequence: SequenceConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

/// How frame files are named on disk: `<prefix><index>.<extension>`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SequenceConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_prefix() -> String {
    DEFAULT_FRAME_PREFIX.to_string()
}
fn default_extension() -> String {
    DEFAULT_FRAME_EXTENSION.to_string()
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            extension: default_extension(),
        }
    }
}

/// Fixed output canvas dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl CanvasConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Integer center of the canvas, the default target anchor.
    pub fn center(&self) -> Point {
        Point::new((self.width / 2) as f64, (self.height / 2) as f64)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// Which point of the subject is pinned to the canvas anchor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum AlignmentPolicy {
    /// Alpha-weighted centroid lands on the anchor.
    #[default]
    Centroid,
    /// Bounding-box center lands on the anchor.
    BboxCenter,
    /// Top-left of the resized crop is pasted at a fixed canvas position.
    FixedAbsolute { x: i64, y: i64 },
}

impl AlignmentPolicy {
    pub fn fixed_absolute_default() -> Self {
        Self::FixedAbsolute {
            x: DEFAULT_TARGET_X,
            y: DEFAULT_TARGET_Y,
        }
    }
}

impl std::fmt::Display for AlignmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Centroid => write!(f, "Centroid"),
            Self::BboxCenter => write!(f, "Bbox Center"),
            Self::FixedAbsolute { x, y } => write!(f, "Fixed Absolute ({x}, {y})"),
        }
    }
}

/// How the subject is scaled onto the canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SizingPolicy {
    /// Uniform scale fitting the reference frame's subject inside the padded canvas.
    ReferenceFrame,
    /// Uniform scale fitting the largest subject of the whole sequence.
    #[default]
    GlobalExtent,
    /// Every crop is resized to one target size.
    FixedTarget(FixedTargetConfig),
}

impl std::fmt::Display for SizingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReferenceFrame => write!(f, "Reference Frame"),
            Self::GlobalExtent => write!(f, "Global Extent"),
            Self::FixedTarget(t) => {
                write!(f, "Fixed Target ({}x{}", t.width, t.height)?;
                if t.preserve_aspect {
                    write!(f, ", aspect preserved)")
                } else {
                    write!(f, ", stretched)")
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedTargetConfig {
    pub width: u32,
    pub height: u32,
    /// Fit inside the target box instead of stretching to it exactly.
    #[serde(default)]
    pub preserve_aspect: bool,
}

impl Default for FixedTargetConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_TARGET_WIDTH,
            height: DEFAULT_TARGET_HEIGHT,
            preserve_aspect: false,
        }
    }
}

/// Interpolation used when resizing the cropped subject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "Nearest"),
            Self::Triangle => write!(f, "Triangle"),
            Self::CatmullRom => write!(f, "Catmull-Rom"),
            Self::Gaussian => write!(f, "Gaussian"),
            Self::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// Engine configuration: everything that shapes the output frames.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormalizeConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Empty margin in pixels kept around the governing subject when auto-scaling.
    #[serde(default = "default_padding")]
    pub padding: u32,
    #[serde(default)]
    pub alignment: AlignmentPolicy,
    #[serde(default)]
    pub sizing: SizingPolicy,
    /// Position (0-based) of the reference frame in the sorted sequence.
    #[serde(default)]
    pub reference_frame: usize,
    /// Target anchor on the canvas. Defaults to the canvas center.
    #[serde(default)]
    pub anchor: Option<Point>,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub resample: ResampleFilter,
}

fn default_padding() -> u32 {
    DEFAULT_PADDING
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            padding: DEFAULT_PADDING,
            alignment: AlignmentPolicy::default(),
            sizing: SizingPolicy::default(),
            reference_frame: 0,
            anchor: None,
            detection: DetectionConfig::default(),
            resample: ResampleFilter::default(),
        }
    }
}

impl NormalizeConfig {
    /// Canvas point the subject anchor is aligned to.
    pub fn target_anchor(&self) -> Point {
        self.anchor.unwrap_or_else(|| self.canvas.center())
    }

    /// Canvas region left for the subject once padding is removed.
    pub fn drawable_area(&self) -> Result<Size> {
        let pad = self.padding.saturating_mul(2);
        if pad >= self.canvas.width || pad >= self.canvas.height {
            return Err(TurntableError::InvalidConfig(format!(
                "padding {} leaves no drawable area on a {}x{} canvas",
                self.padding, self.canvas.width, self.canvas.height
            )));
        }
        Ok(Size::new(self.canvas.width - pad, self.canvas.height - pad))
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(TurntableError::InvalidDimensions {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        match &self.sizing {
            SizingPolicy::FixedTarget(t) => {
                if t.width == 0 || t.height == 0 {
                    return Err(TurntableError::InvalidConfig(format!(
                        "fixed target size must be > 0, got {}x{}",
                        t.width, t.height
                    )));
                }
            }
            SizingPolicy::ReferenceFrame | SizingPolicy::GlobalExtent => {
                self.drawable_area()?;
            }
        }
        Ok(())
    }
}
