pub mod analyzer;
pub mod reference;

pub use analyzer::{analyze_sequence, analyze_sequence_with_progress, detect_all, max_extent};
pub use reference::{fit_scale, ReferenceGeometry, ScaleRule};
