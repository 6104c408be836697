//! Inference backend settings.
//!
//! The local checkpoint is fixed at build time; only transport settings of
//! its runtime are configurable.

use ai_core::VisionConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Remote vision backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionAppConfig {
    /// Base URL of the Generative Language API
    #[serde(default = "default_vision_base_url")]
    pub base_url: String,

    /// Multimodal model to call
    #[serde(default = "default_vision_model")]
    pub model: String,

    /// Request timeout in milliseconds (unset = wait for completion)
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Optional cap on generated tokens
    #[serde(default)]
    pub max_output_tokens: Option<u32>,

    /// API key; falls back to the `API_KEY` environment variable
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

fn default_vision_base_url() -> String {
    VisionConfig::default().base_url
}

fn default_vision_model() -> String {
    VisionConfig::default().model
}

impl Default for VisionAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_vision_base_url(),
            model: default_vision_model(),
            timeout_ms: None,
            max_output_tokens: None,
            api_key: None,
        }
    }
}

impl VisionAppConfig {
    /// Engine settings without the credential
    pub fn engine_config(&self) -> VisionConfig {
        VisionConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            timeout_ms: self.timeout_ms,
            max_output_tokens: self.max_output_tokens,
        }
    }
}
