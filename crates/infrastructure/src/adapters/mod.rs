//! Adapters implementing application ports

mod fs_artifact_store;
mod local_model_inference_adapter;
mod tracing_progress;
mod vision_inference_adapter;

use ai_core::InferenceError;
use application::ApplicationError;

pub use fs_artifact_store::FsArtifactStore;
pub use local_model_inference_adapter::LocalModelInferenceAdapter;
pub use tracing_progress::TracingProgressReporter;
pub use vision_inference_adapter::VisionInferenceAdapter;

/// Every engine failure surfaces as a backend error
fn map_inference_error(backend: &str, e: InferenceError) -> ApplicationError {
    ApplicationError::Backend(format!("{backend}: {e}"))
}
