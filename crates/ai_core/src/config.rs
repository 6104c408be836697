//! Configuration for the inference engines

use serde::{Deserialize, Serialize};

/// Configuration for the remote vision engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
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
}

fn default_vision_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_vision_model() -> String {
    "gemini-1.5-flash".to_string()
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: default_vision_base_url(),
            model: default_vision_model(),
            timeout_ms: None,
            max_output_tokens: None,
        }
    }
}

/// Connection settings for the local model runtime
///
/// Only transport settings live here; the checkpoint itself is fixed by
/// [`ModelCheckpoint`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalModelConfig {
    /// Base URL of the Ollama-compatible runtime
    #[serde(default = "default_local_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds (unset = wait for completion)
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// How long the runtime keeps the model resident (negative = forever)
    #[serde(default = "default_keep_alive")]
    pub keep_alive: String,
}

fn default_local_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_keep_alive() -> String {
    "-1m".to_string()
}

impl Default for LocalModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_local_base_url(),
            timeout_ms: None,
            keep_alive: default_keep_alive(),
        }
    }
}

/// Load-time constants of a fine-tuned checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCheckpoint {
    /// Hugging Face repository of the checkpoint
    pub model_id: &'static str,
    /// Context window the model was fine-tuned with
    pub max_seq_length: u32,
    /// Load the 4-bit quantized weights
    pub load_in_4bit: bool,
    /// Generation budget per call
    pub max_new_tokens: u32,
}

/// Quantization tag selected when `load_in_4bit` is set
pub const FOUR_BIT_QUANTIZATION: &str = "Q4_K_M";

/// Disease diagnosis checkpoint used by the local backend
pub const DISEASE_DIAGNOSIS_CHECKPOINT: ModelCheckpoint = ModelCheckpoint {
    model_id: "iamak132003/disease_diagnosis",
    max_seq_length: 2048,
    load_in_4bit: true,
    max_new_tokens: 800,
};

impl ModelCheckpoint {
    /// Reference the runtime resolves the checkpoint by
    ///
    /// ```
    /// use ai_core::DISEASE_DIAGNOSIS_CHECKPOINT;
    ///
    /// assert_eq!(
    ///     DISEASE_DIAGNOSIS_CHECKPOINT.model_ref(),
    ///     "hf.co/iamak132003/disease_diagnosis:Q4_K_M"
    /// );
    /// ```
    #[must_use]
    pub fn model_ref(&self) -> String {
        if self.load_in_4bit {
            format!("hf.co/{}:{FOUR_BIT_QUANTIZATION}", self.model_id)
        } else {
            format!("hf.co/{}", self.model_id)
        }
    }
}
