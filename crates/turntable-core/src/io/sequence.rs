use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TurntableError};
use crate::frame::Frame;
use crate::pipeline::config::SequenceConfig;

use super::image_io::load_frame;
use super::source::FrameSource;

/// One frame file of a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameEntry {
    /// Index parsed from the file name.
    pub index: usize,
    pub path: PathBuf,
}

/// Frame files of a directory, ordered by index.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    entries: Vec<FrameEntry>,
}

impl FrameSequence {
    pub fn from_entries(mut entries: Vec<FrameEntry>) -> Self {
        entries.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.path.cmp(&b.path)));
        Self { entries }
    }

    pub fn entries(&self) -> &[FrameEntry] {
        &self.entries
    }

    pub fn entry(&self, position: usize) -> Result<&FrameEntry> {
        self.entries
            .get(position)
            .ok_or(TurntableError::FrameIndexOutOfRange {
                index: position,
                total: self.entries.len(),
            })
    }

    /// Where the normalized version of the frame at `position` is written:
    /// the same file stem inside `output_dir`, always as PNG.
    pub fn output_path(&self, position: usize, output_dir: &Path) -> Result<PathBuf> {
        let entry = self.entry(position)?;
        let stem = entry
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("frame");
        Ok(output_dir.join(format!("{stem}.png")))
    }
}

impl FrameSource for FrameSequence {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn load(&self, position: usize) -> Result<Frame> {
        let entry = self.entry(position)?;
        load_frame(&entry.path, entry.index)
    }
}

/// List `<prefix><digits>.<extension>` files in `dir`, sorted by index.
pub fn discover_frames(dir: &Path, config: &SequenceConfig) -> Result<FrameSequence> {
    let mut entries = Vec::new();

    for dir_entry in std::fs::read_dir(dir)? {
        let path = dir_entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match parse_frame_index(name, config) {
            Some(index) => entries.push(FrameEntry { index, path }),
            None => debug!(file = name, "Ignoring non-frame file"),
        }
    }

    if entries.is_empty() {
        return Err(TurntableError::EmptySequence);
    }

    Ok(FrameSequence::from_entries(entries))
}

/// Parse the index out of a file name such as `frame_007.png`.
pub fn parse_frame_index(file_name: &str, config: &SequenceConfig) -> Option<usize> {
    let rest = file_name.strip_prefix(config.prefix.as_str())?;
    let (digits, ext) = rest.rsplit_once('.')?;
    if !ext.eq_ignore_ascii_case(&config.extension) {
        return None;
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
