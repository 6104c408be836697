//! Local model inference adapter - Implements InferenceBackend over a shared LocalModelHandle

use std::{sync::Arc, time::Instant};

use ai_core::LocalModelHandle;
use application::{
    error::ApplicationError,
    ports::{ImageAttachment, InferenceBackend, InferenceResult},
};
use async_trait::async_trait;
use domain::{BackendKind, TaskPrompt};
use tracing::{debug, instrument, warn};

use super::map_inference_error;

/// Adapter for the locally served diagnosis model
///
/// The handle is loaded on the first call, not when the adapter is built.
#[derive(Debug, Clone)]
pub struct LocalModelInferenceAdapter {
    handle: Arc<LocalModelHandle>,
}

impl LocalModelInferenceAdapter {
    pub const fn new(handle: Arc<LocalModelHandle>) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &Arc<LocalModelHandle> {
        &self.handle
    }
}

#[async_trait]
impl InferenceBackend for LocalModelInferenceAdapter {
    #[instrument(skip(self, prompt, attachment), fields(task = %prompt.kind(), loaded = self.handle.is_loaded()))]
    async fn run(
        &self,
        prompt: &TaskPrompt,
        attachment: Option<&ImageAttachment>,
    ) -> Result<InferenceResult, ApplicationError> {
        if attachment.is_some() {
            warn!("Local model is text-only, ignoring attachment");
        }

        let start = Instant::now();
        let response = self
            .handle
            .generate(prompt.as_str())
            .await
            .map_err(|e| map_inference_error("local-model", e))?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            model = %response.model,
            finish_reason = ?response.finish_reason,
            latency_ms,
            "Local inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.handle.health_check().await.unwrap_or(false)
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::LocalModel
    }

    fn model_name(&self) -> String {
        self.handle.model_ref().to_string()
    }
}
