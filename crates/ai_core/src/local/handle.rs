//! Lazily loaded handle to the local diagnosis model

use std::time::{Duration, Instant};

use reqwest::{Client, Response, StatusCode};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, instrument, warn};

use super::{
    sequence::decode_full_sequence,
    wire::{GenerateOptions, GenerateRequest, GenerateResponse, TagsResponse},
};
use crate::{
    config::{DISEASE_DIAGNOSIS_CHECKPOINT, LocalModelConfig, ModelCheckpoint},
    error::InferenceError,
    types::{InferenceResponse, TokenUsage},
};

/// Outcome of the one-time load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModel {
    /// Reference the runtime resolved
    pub model_ref: String,
    /// Wall-clock time the load request took
    pub load_duration_ms: u64,
}

/// Explicitly owned handle to the fine-tuned checkpoint
///
/// Share it behind an `Arc`. The first call to [`ensure_loaded`] or
/// [`generate`] loads the model; concurrent first callers wait on the same
/// load. A failed load leaves the handle unloaded so a later call can try
/// again.
///
/// [`ensure_loaded`]: Self::ensure_loaded
/// [`generate`]: Self::generate
pub struct LocalModelHandle {
    client: Client,
    config: LocalModelConfig,
    checkpoint: ModelCheckpoint,
    model_ref: String,
    loaded: OnceCell<LoadedModel>,
    generation: Mutex<()>,
}

impl std::fmt::Debug for LocalModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalModelHandle")
            .field("base_url", &self.config.base_url)
            .field("model_ref", &self.model_ref)
            .field("loaded", &self.loaded.initialized())
            .finish_non_exhaustive()
    }
}

impl LocalModelHandle {
    /// Handle for the disease diagnosis checkpoint
    pub fn new(config: LocalModelConfig) -> Result<Self, InferenceError> {
        Self::with_checkpoint(config, DISEASE_DIAGNOSIS_CHECKPOINT)
    }

    /// Handle for an arbitrary checkpoint
    pub fn with_checkpoint(
        config: LocalModelConfig,
        checkpoint: ModelCheckpoint,
    ) -> Result<Self, InferenceError> {
        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        let model_ref = checkpoint.model_ref();
        info!(
            base_url = %config.base_url,
            model = %model_ref,
            max_seq_length = checkpoint.max_seq_length,
            max_new_tokens = checkpoint.max_new_tokens,
            "Created local model handle"
        );

        Ok(Self {
            client,
            config,
            checkpoint,
            model_ref,
            loaded: OnceCell::new(),
            generation: Mutex::new(()),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Reference the runtime resolves the checkpoint by
    pub fn model_ref(&self) -> &str {
        &self.model_ref
    }

    pub const fn checkpoint(&self) -> &ModelCheckpoint {
        &self.checkpoint
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Load the checkpoint unless that already happened
    pub async fn ensure_loaded(&self) -> Result<&LoadedModel, InferenceError> {
        self.loaded.get_or_try_init(|| self.load()).await
    }

    #[instrument(skip(self), fields(model = %self.model_ref))]
    async fn load(&self) -> Result<LoadedModel, InferenceError> {
        info!("Loading local model");
        let started = Instant::now();

        let request = GenerateRequest {
            model: &self.model_ref,
            prompt: None,
            raw: false,
            stream: false,
            keep_alive: &self.config.keep_alive,
            options: GenerateOptions {
                num_ctx: self.checkpoint.max_seq_length,
                num_predict: None,
            },
        };

        let response = self
            .client
            .post(self.api_url("generate"))
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let load_duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            load_duration_ms,
            runtime_load_ns = ?body.load_duration,
            "Local model loaded"
        );

        Ok(LoadedModel {
            model_ref: body.model.unwrap_or_else(|| self.model_ref.clone()),
            load_duration_ms,
        })
    }

    /// Generate a completion for a raw prompt
    ///
    /// The prompt is sent verbatim and the returned content is the full
    /// decoded sequence, boundary tokens included. Calls are serialized.
    #[instrument(skip(self, prompt), fields(model = %self.model_ref, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<InferenceResponse, InferenceError> {
        self.ensure_loaded().await?;

        let _turn = self.generation.lock().await;
        debug!("Generating");

        let request = GenerateRequest {
            model: &self.model_ref,
            prompt: Some(prompt),
            raw: true,
            stream: false,
            keep_alive: &self.config.keep_alive,
            options: GenerateOptions {
                num_ctx: self.checkpoint.max_seq_length,
                num_predict: Some(self.checkpoint.max_new_tokens),
            },
        };

        let response = self
            .client
            .post(self.api_url("generate"))
            .json(&request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let stopped = body.stopped_naturally();
        let usage = match (body.prompt_eval_count, body.eval_count) {
            (Some(prompt_tokens), Some(completion_tokens)) => {
                Some(TokenUsage::new(prompt_tokens, completion_tokens))
            },
            _ => None,
        };
        debug!(tokens = ?usage, stopped, "Generation completed");

        Ok(InferenceResponse {
            content: decode_full_sequence(prompt, &body.response, stopped),
            model: body.model.unwrap_or_else(|| self.model_ref.clone()),
            usage,
            finish_reason: body.done_reason,
        })
    }

    /// Check that the runtime answers and knows the checkpoint
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .client
            .get(self.api_url("tags"))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let tags: TagsResponse = resp
                    .json()
                    .await
                    .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;
                let known = tags.models.iter().any(|m| m.name == self.model_ref);
                if !known {
                    debug!(model = %self.model_ref, "Checkpoint not pulled yet");
                }
                Ok(known || self.is_loaded())
            },
            Ok(_) => Ok(false),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    async fn check_status(response: Response) -> Result<Response, InferenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Local runtime request failed");

        let err = match status {
            StatusCode::NOT_FOUND => InferenceError::ModelNotAvailable(body),
            StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
            _ => InferenceError::ServerError(format!("Status {status}: {body}")),
        };
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_api_urls() {
        let handle = LocalModelHandle::new(LocalModelConfig {
            base_url: "http://runtime:11434/".to_string(),
            ..LocalModelConfig::default()
        })
        .unwrap();
        assert_eq!(handle.api_url("generate"), "http://runtime:11434/api/generate");
        assert_eq!(handle.api_url("/tags"), "http://runtime:11434/api/tags");
    }

    #[test]
    fn starts_unloaded() {
        let handle = LocalModelHandle::new(LocalModelConfig::default()).unwrap();
        assert!(!handle.is_loaded());
        assert_eq!(handle.model_ref(), "hf.co/iamak132003/disease_diagnosis:Q4_K_M");
        assert!(format!("{handle:?}").contains("loaded: false"));
    }
}
