//! Wire format of the runtime's `/api/generate` endpoint

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateRequest<'a> {
    pub model: &'a str,
    /// Absent for the load request, which only brings the model into memory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'a str>,
    pub raw: bool,
    pub stream: bool,
    pub keep_alive: &'a str,
    pub options: GenerateOptions,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerateOptions {
    pub num_ctx: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
    #[serde(default)]
    pub load_duration: Option<u64>,
}

impl GenerateResponse {
    /// Whether generation ended on an end-of-sequence token
    ///
    /// Older runtimes omit `done_reason`; a finished response is then
    /// treated as a natural stop.
    pub fn stopped_naturally(&self) -> bool {
        match self.done_reason.as_deref() {
            Some(reason) => reason == "stop",
            None => self.done,
        }
    }
}

/// Models list response
#[derive(Debug, Deserialize)]
pub(super) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TagEntry {
    pub name: String,
}
