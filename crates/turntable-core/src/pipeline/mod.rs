pub mod config;
mod normalize;
mod orchestrator;
mod types;

pub use normalize::{normalize_frame, NormalizedFrame};
pub use orchestrator::{normalize_sequence, run_pipeline, run_pipeline_reported};
pub use types::{FrameStatus, PipelineStage, ProgressReporter, RunReport, RunSummary};
