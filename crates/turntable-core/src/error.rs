use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TurntableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Frame {path} could not be decoded: {reason}")]
    FrameUnreadable { path: PathBuf, reason: String },

    #[error("No subject detected in frame {index}")]
    NoSubjectDetected { index: usize },

    #[error("No usable reference subject found in the sequence")]
    ReferenceNotFound,

    #[error("Reference frame {index} out of range (total: {total})")]
    ReferenceIndexOutOfRange { index: usize, total: usize },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Empty frame sequence")]
    EmptySequence,
}

pub type Result<T> = std::result::Result<T, TurntableError>;
