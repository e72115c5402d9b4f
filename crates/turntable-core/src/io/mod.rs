pub mod image_io;
pub mod sequence;
pub mod source;

pub use sequence::{discover_frames, FrameEntry, FrameSequence};
pub use source::FrameSource;
