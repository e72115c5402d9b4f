use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BACKGROUND_THRESHOLD;

/// Configuration for foreground detection in a single frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Luma level (0-255) a pixel must exceed to count as foreground when
    /// the frame has no alpha channel. Ignored for frames with alpha.
    #[serde(default = "default_background_threshold")]
    pub background_threshold: u8,
}

fn default_background_threshold() -> u8 {
    DEFAULT_BACKGROUND_THRESHOLD
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            background_threshold: DEFAULT_BACKGROUND_THRESHOLD,
        }
    }
}
