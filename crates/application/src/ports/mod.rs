//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod artifact_store_port;
mod inference_backend;
mod progress_port;

#[cfg(test)]
pub use artifact_store_port::MockArtifactStorePort;
pub use artifact_store_port::ArtifactStorePort;
pub use inference_backend::{ImageAttachment, InferenceBackend, InferenceResult};
#[cfg(test)]
pub use progress_port::MockProgressPort;
pub use progress_port::{NoopProgress, ProgressPort};
