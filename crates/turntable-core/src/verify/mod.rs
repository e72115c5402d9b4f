pub mod report;

pub use report::{
    check_alignment, check_alignment_with_progress, AlignmentReport, FramePlacement, Spread,
};
