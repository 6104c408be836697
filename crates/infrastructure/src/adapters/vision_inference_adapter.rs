//! Vision inference adapter - Implements InferenceBackend using ai_core's VisionEngine

use std::time::Instant;

use ai_core::{ImageInput, VisionConfig, VisionEngine};
use application::{
    error::ApplicationError,
    ports::{ImageAttachment, InferenceBackend, InferenceResult},
};
use async_trait::async_trait;
use domain::{BackendKind, TaskPrompt};
use secrecy::SecretString;
use tracing::{debug, instrument};

use super::map_inference_error;

/// Adapter for the remote multimodal model
#[derive(Debug)]
pub struct VisionInferenceAdapter {
    engine: VisionEngine,
}

impl VisionInferenceAdapter {
    pub fn new(config: VisionConfig, api_key: SecretString) -> Result<Self, ApplicationError> {
        let engine = VisionEngine::new(config, api_key)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { engine })
    }
}

#[async_trait]
impl InferenceBackend for VisionInferenceAdapter {
    #[instrument(skip(self, prompt, attachment), fields(task = %prompt.kind(), model = %self.engine.model()))]
    async fn run(
        &self,
        prompt: &TaskPrompt,
        attachment: Option<&ImageAttachment>,
    ) -> Result<InferenceResult, ApplicationError> {
        let Some(attachment) = attachment else {
            return Err(ApplicationError::Internal(
                "vision backend called without an attachment".to_string(),
            ));
        };

        let start = Instant::now();
        let image = ImageInput::new(attachment.media_type.mime(), attachment.bytes.clone());
        let response = self
            .engine
            .analyze(prompt.as_str(), &image)
            .await
            .map_err(|e| map_inference_error("remote-vision", e))?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            model = %response.model,
            tokens = ?response.usage.map(|u| u.total_tokens),
            latency_ms,
            "Vision inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::RemoteVision
    }

    fn model_name(&self) -> String {
        self.engine.model().to_string()
    }
}

#[cfg(test)]
mod tests {
    use domain::{Task, TaskKind};

    use super::*;

    fn adapter() -> VisionInferenceAdapter {
        VisionInferenceAdapter::new(VisionConfig::default(), SecretString::from("k")).unwrap()
    }

    #[test]
    fn reports_kind_and_model() {
        let adapter = adapter();
        assert_eq!(adapter.backend_kind(), BackendKind::RemoteVision);
        assert_eq!(adapter.model_name(), "gemini-1.5-flash");
        assert_eq!(TaskKind::LabReport.backend(), adapter.backend_kind());
    }

    #[tokio::test]
    async fn requires_attachment() {
        let prompt = application::PromptBuilder::build(&Task::LabReport);
        let err = adapter().run(&prompt, None).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Internal(_)));
    }
}
