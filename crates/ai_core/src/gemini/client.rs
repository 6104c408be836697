//! Gemini client implementation

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument, warn};

use super::wire::{GenerateContentRequest, GenerateContentResponse};
use crate::{
    config::VisionConfig,
    error::InferenceError,
    types::{ImageInput, InferenceResponse},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Remote multimodal model reached over the Generative Language API
pub struct VisionEngine {
    client: Client,
    config: VisionConfig,
    api_key: SecretString,
}

impl std::fmt::Debug for VisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionEngine")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl VisionEngine {
    /// Create a new vision engine
    pub fn new(config: VisionConfig, api_key: SecretString) -> Result<Self, InferenceError> {
        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized vision engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Build the API URL for a given resource path
    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/v1beta/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Model used for every request
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send the instruction and the image in one request and return the text
    ///
    /// Single attempt: failures are returned to the caller, never retried.
    #[instrument(
        skip(self, prompt, image),
        fields(model = %self.config.model, mime = %image.mime_type, image_bytes = image.data.len())
    )]
    pub async fn analyze(
        &self,
        prompt: &str,
        image: &ImageInput,
    ) -> Result<InferenceResponse, InferenceError> {
        let request = GenerateContentRequest::new(prompt, image, self.config.max_output_tokens);

        debug!("Sending request to vision model");

        let response = self
            .client
            .post(self.api_url(&format!("models/{}:generateContent", self.config.model)))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let response = Self::check_status(response).await?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let Some(content) = body.text() else {
            let reason = body
                .block_reason()
                .map_or_else(|| "no text in response".to_string(), |r| format!("blocked: {r}"));
            warn!(%reason, "Vision model returned no text");
            return Err(InferenceError::InvalidResponse(reason));
        };

        let usage = body.usage();
        debug!(tokens = ?usage, "Vision inference completed");

        Ok(InferenceResponse {
            content,
            model: body
                .model_version
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            usage,
            finish_reason: body.finish_reason(),
        })
    }

    /// Check that the configured model is reachable with the configured key
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .client
            .get(self.api_url(&format!("models/{}", self.config.model)))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    /// Map non-success statuses to errors
    async fn check_status(response: Response) -> Result<Response, InferenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Vision request failed");

        // An invalid key is reported as 400 with API_KEY_INVALID
        let err = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                InferenceError::Unauthorized(format!("Status {status}"))
            },
            StatusCode::BAD_REQUEST if body.contains("API_KEY_INVALID") => {
                InferenceError::Unauthorized("API key rejected".to_string())
            },
            StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
            StatusCode::NOT_FOUND => InferenceError::ModelNotAvailable(body),
            _ => InferenceError::ServerError(format!("Status {status}: {body}")),
        };
        Err(err)
    }
}
