/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Default output canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;

/// Default output canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Default empty margin kept around the subject when auto-scaling.
pub const DEFAULT_PADDING: u32 = 80;

/// Luma level (0-255) above which a pixel of an image without alpha
/// counts as foreground.
pub const DEFAULT_BACKGROUND_THRESHOLD: u8 = 10;

/// Default subject width for fixed-target sizing.
pub const DEFAULT_TARGET_WIDTH: u32 = 480;

/// Default subject height for fixed-target sizing.
pub const DEFAULT_TARGET_HEIGHT: u32 = 360;

/// Default top-left canvas position for fixed-absolute placement.
pub const DEFAULT_TARGET_X: i64 = 160;

/// Default top-left canvas position for fixed-absolute placement.
pub const DEFAULT_TARGET_Y: i64 = 120;

/// File name prefix of sequence frames (`frame_001.png`).
pub const DEFAULT_FRAME_PREFIX: &str = "frame_";

/// File extension of sequence frames.
pub const DEFAULT_FRAME_EXTENSION: &str = "png";

/// Maximum centroid spread (pixels) for a sequence to count as aligned.
pub const DEFAULT_ALIGNMENT_TOLERANCE: f64 = 5.0;

/// Alpha value written for occupied pixels of images without an alpha channel.
pub const OPAQUE_ALPHA: u8 = 255;
