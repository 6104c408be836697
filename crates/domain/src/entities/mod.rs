//! Domain entities - Inputs and outputs of one analysis request

mod analysis_report;
mod symptom_record;
mod task;
mod transient_artifact;
mod uploaded_file;

pub use analysis_report::{AnalysisReport, FormattedDiagnosis};
pub use symptom_record::{MAX_SYMPTOMS_CHARS, SymptomRecord};
pub use task::{Task, TaskPrompt};
pub use transient_artifact::{ReleaseStatus, TransientArtifact};
pub use uploaded_file::UploadedFile;
