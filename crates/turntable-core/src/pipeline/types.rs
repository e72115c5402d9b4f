use crate::analysis::ReferenceGeometry;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Discovering,
    Analyzing,
    Normalizing,
    Verifying,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovering => write!(f, "Discovering frames"),
            Self::Analyzing => write!(f, "Analyzing sequence"),
            Self::Normalizing => write!(f, "Normalizing frames"),
            Self::Verifying => write!(f, "Verifying alignment"),
        }
    }
}

/// Outcome of one frame in the normalization phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Subject fully visible on the canvas.
    Placed,
    /// Subject partly cut by the canvas edge.
    Clipped,
    /// No subject detected; an empty canvas was written.
    NoSubject,
    /// Transform put the subject entirely outside the canvas; an empty canvas was written.
    OffCanvas,
    /// Frame could not be read or its output could not be written.
    Skipped,
}

impl FrameStatus {
    /// An output was written, but it carries no visible subject.
    pub fn is_degraded(self) -> bool {
        matches!(self, Self::NoSubject | Self::OffCanvas)
    }
}

/// Aggregate counts of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    /// Frames with an output written (degraded ones included).
    pub processed: usize,
    pub skipped: usize,
    pub degraded: usize,
    /// Frames whose subject was visible but partially clipped.
    pub clipped: usize,
}

impl RunSummary {
    pub fn record(&mut self, status: FrameStatus) {
        self.total += 1;
        match status {
            FrameStatus::Skipped => self.skipped += 1,
            FrameStatus::Placed => self.processed += 1,
            FrameStatus::Clipped => {
                self.processed += 1;
                self.clipped += 1;
            }
            FrameStatus::NoSubject | FrameStatus::OffCanvas => {
                self.processed += 1;
                self.degraded += 1;
            }
        }
    }

    pub fn from_statuses(statuses: impl IntoIterator<Item = FrameStatus>) -> Self {
        let mut summary = Self::default();
        for status in statuses {
            summary.record(status);
        }
        summary
    }
}

/// Everything a finished run reports back.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub geometry: ReferenceGeometry,
    pub summary: RunSummary,
    /// Per-frame statuses, in sequence order, paired with the frame's position.
    pub frames: Vec<(usize, FrameStatus)>,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
