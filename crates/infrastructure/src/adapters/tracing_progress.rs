//! Progress reporter writing stages to the log

use application::ports::ProgressPort;
use domain::ProgressStage;
use tracing::info;

/// Logs each progress stage as an info event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressReporter;

impl ProgressPort for TracingProgressReporter {
    fn report(&self, stage: ProgressStage) {
        info!(stage = ?stage, "{stage}");
    }
}
