pub mod canvas;
pub mod clip;

pub use canvas::{composite, empty_canvas, extract_subject, Composite, Placement};
pub use clip::{clip_to_canvas, Overlap};
