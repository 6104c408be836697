//! Progress lines on the terminal

use application::ProgressPort;
use domain::ProgressStage;

/// Prints each diagnosis stage on its own line
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleProgress;

impl ProgressPort for ConsoleProgress {
    fn report(&self, stage: ProgressStage) {
        println!("{stage}");
    }
}
