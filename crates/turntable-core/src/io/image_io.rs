use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Result, TurntableError};
use crate::frame::Frame;

/// Decode an image file into a Frame.
///
/// Any decode failure is reported as `FrameUnreadable` so callers can skip
/// the frame and keep going.
pub fn load_frame(path: &Path, index: usize) -> Result<Frame> {
    let img = image::open(path).map_err(|e| TurntableError::FrameUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let frame = Frame::from_dynamic(index, img);
    if frame.width() == 0 || frame.height() == 0 {
        return Err(TurntableError::FrameUnreadable {
            path: path.to_path_buf(),
            reason: format!("empty image ({}x{})", frame.width(), frame.height()),
        });
    }
    Ok(frame)
}

/// Save a canvas as 8-bit RGBA PNG.
pub fn save_canvas(canvas: &RgbaImage, path: &Path) -> Result<()> {
    canvas.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
