//! Inference backend port - one implementation per backend kind

use std::fmt;

use async_trait::async_trait;
use domain::{BackendKind, MediaType, TaskPrompt};

use crate::error::ApplicationError;

/// Result of an inference call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    /// Raw text produced by the backend
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// File content handed to a backend together with the prompt
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub const fn new(media_type: MediaType, bytes: Vec<u8>) -> Self {
        Self { media_type, bytes }
    }
}

impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Port for inference backends
///
/// Every failure (network, credentials, status, malformed body) is reported
/// as [`ApplicationError::Backend`]. Implementations never retry.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Run a prompt, optionally with an attached image or document
    async fn run(
        &self,
        prompt: &TaskPrompt,
        attachment: Option<&ImageAttachment>,
    ) -> Result<InferenceResult, ApplicationError>;

    /// Check if the backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Which backend this is
    fn backend_kind(&self) -> BackendKind;

    /// Name of the model requests go to
    fn model_name(&self) -> String;
}
