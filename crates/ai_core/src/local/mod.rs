//! Fine-tuned local model served by an Ollama-compatible runtime
//!
//! The checkpoint is loaded at most once per [`LocalModelHandle`], on first
//! use, and prompts are sent in raw mode so the fine-tuning template reaches
//! the model untouched.

mod handle;
mod sequence;
mod wire;

pub use handle::{LoadedModel, LocalModelHandle};
pub use sequence::{BEGIN_OF_TEXT, END_OF_TEXT};
