/// Which half of the pipeline a progress event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressPhase {
    Detect,
    Enhance,
}

impl ProgressPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressPhase::Detect => "detect",
            ProgressPhase::Enhance => "enhance",
        }
    }
}

/// Observer for pipeline progress events.
///
/// Decouples the orchestration from specific output mechanisms (stdout,
/// worker channels, tests) so callers can watch the pipeline without the
/// orchestration code knowing about them.
pub trait ProgressSink: Send {
    fn progress(&mut self, phase: ProgressPhase, percent: u8);
}

/// Silent sink that discards all events. Used by tests and by callers
/// that poll results instead.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn progress(&mut self, _phase: ProgressPhase, _percent: u8) {}
}

/// CLI-oriented sink that reports through the `log` crate.
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn progress(&mut self, phase: ProgressPhase, percent: u8) {
        log::info!("{}: {percent}%", phase.as_str());
    }
}
