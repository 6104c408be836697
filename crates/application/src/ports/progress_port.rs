//! Progress port - advisory stage notifications

use domain::ProgressStage;
#[cfg(test)]
use mockall::automock;

/// Receives advisory progress stages while a request runs
///
/// Stages carry no semantic weight; implementations must not fail.
#[cfg_attr(test, automock)]
pub trait ProgressPort: Send + Sync {
    fn report(&self, stage: ProgressStage);
}

/// Progress sink that drops every stage
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressPort for NoopProgress {
    fn report(&self, _stage: ProgressStage) {}
}
