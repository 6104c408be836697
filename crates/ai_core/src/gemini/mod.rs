//! Gemini-compatible multimodal engine
//!
//! Talks to the Generative Language REST API (`models/{model}:generateContent`)
//! and sends the instruction and the image inline in a single request.

mod client;
mod wire;

pub use client::VisionEngine;
