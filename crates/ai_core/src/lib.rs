//! AI Core - Inference engines for MedAssist
//!
//! Two engines, one per backend:
//! - [`VisionEngine`] sends an instruction and an image to a remote
//!   Gemini-compatible multimodal model.
//! - [`LocalModelHandle`] owns a fine-tuned checkpoint served by a local
//!   Ollama-compatible runtime, loads it once and runs raw-prompt generation.

pub mod config;
pub mod error;
pub mod gemini;
pub mod local;
pub mod types;

pub use config::{DISEASE_DIAGNOSIS_CHECKPOINT, LocalModelConfig, ModelCheckpoint, VisionConfig};
pub use error::InferenceError;
pub use gemini::VisionEngine;
pub use local::{BEGIN_OF_TEXT, END_OF_TEXT, LoadedModel, LocalModelHandle};
pub use types::{ImageInput, InferenceResponse, TokenUsage};
