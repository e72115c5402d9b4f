use crate::error::{Result, TurntableError};
use crate::frame::Frame;

/// Random access to the frames of a sequence.
///
/// Frames are loaded fresh on every call and dropped by the caller after
/// use; implementors must be shareable across Rayon workers.
pub trait FrameSource: Sync {
    /// Number of frames in the sequence.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load the frame at `position` (0-based, in sequence order).
    fn load(&self, position: usize) -> Result<Frame>;
}

/// In-memory sequences, mostly useful for tests and embedding.
impl FrameSource for [Frame] {
    fn len(&self) -> usize {
        <[Frame]>::len(self)
    }

    fn load(&self, position: usize) -> Result<Frame> {
        self.get(position)
            .cloned()
            .ok_or(TurntableError::FrameIndexOutOfRange {
                index: position,
                total: <[Frame]>::len(self),
            })
    }
}

impl FrameSource for Vec<Frame> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn load(&self, position: usize) -> Result<Frame> {
        self.as_slice().load(position)
    }
}
