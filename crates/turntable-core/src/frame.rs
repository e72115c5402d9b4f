use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// A single decoded frame of the sequence.
///
/// Pixels are always stored as 8-bit RGBA. `has_alpha` records whether the
/// source carried a real alpha channel; when it did not, the alpha plane is
/// fully opaque and occupancy has to be derived from luma instead.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Stable sequence index (parsed from `frame_<index>`).
    pub index: usize,
    pub pixels: RgbaImage,
    pub has_alpha: bool,
}

impl Frame {
    pub fn new(index: usize, pixels: RgbaImage, has_alpha: bool) -> Self {
        Self {
            index,
            pixels,
            has_alpha,
        }
    }

    /// Wrap a decoded image, remembering whether it had alpha.
    pub fn from_dynamic(index: usize, image: DynamicImage) -> Self {
        let has_alpha = image.color().has_alpha();
        Self::new(index, image.to_rgba8(), has_alpha)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// A position in pixel-index coordinates (pixel `(i, j)` sits at `x = i, y = j`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Minimal axis-aligned rectangle enclosing all occupied pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Geometric center in pixel-index coordinates.
    pub fn center(&self) -> Point {
        Point {
            x: self.x as f64 + (self.width as f64 - 1.0) / 2.0,
            y: self.y as f64 + (self.height as f64 - 1.0) / 2.0,
        }
    }

    /// Position of `p` relative to the box origin.
    pub fn local(&self, p: Point) -> Point {
        Point {
            x: p.x - self.x as f64,
            y: p.y - self.y as f64,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

/// Width and height of a region in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
