//! Task kinds and the tables that route them
//!
//! Every task kind maps to exactly one backend, one response layout and a
//! set of accepted upload types. Adding a task kind means adding a variant
//! and extending these tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::MediaType;

/// The kind of analysis a user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    /// Summarize an uploaded lab report
    LabReport,
    /// Explain an uploaded doctor's prescription
    Prescription,
    /// Diagnose from a structured symptom record
    Diagnosis,
}

/// Which inference backend serves a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Remote multimodal vision-language model
    RemoteVision,
    /// Locally served fine-tuned generative model
    LocalModel,
}

/// Shape of the text a backend returns for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseLayout {
    /// Output echoes the prompt template; the answer follows the response marker
    Templated,
    /// Output is the answer itself
    FreeForm,
}

const LAB_REPORT_MEDIA: &[MediaType] = &[MediaType::Pdf, MediaType::Jpeg, MediaType::Png];
const PRESCRIPTION_MEDIA: &[MediaType] = &[MediaType::Jpeg, MediaType::Png];

impl TaskKind {
    /// All task kinds
    pub const ALL: [Self; 3] = [Self::LabReport, Self::Prescription, Self::Diagnosis];

    /// Backend that serves this task
    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        match self {
            Self::LabReport | Self::Prescription => BackendKind::RemoteVision,
            Self::Diagnosis => BackendKind::LocalModel,
        }
    }

    /// Layout of the backend's raw output for this task
    #[must_use]
    pub const fn response_layout(&self) -> ResponseLayout {
        match self {
            Self::LabReport | Self::Prescription => ResponseLayout::FreeForm,
            Self::Diagnosis => ResponseLayout::Templated,
        }
    }

    /// Upload types accepted for this task (empty for tasks without uploads)
    #[must_use]
    pub const fn accepted_media(&self) -> &'static [MediaType] {
        match self {
            Self::LabReport => LAB_REPORT_MEDIA,
            Self::Prescription => PRESCRIPTION_MEDIA,
            Self::Diagnosis => &[],
        }
    }

    /// Whether this task takes an uploaded artifact
    #[must_use]
    pub const fn requires_upload(&self) -> bool {
        !self.accepted_media().is_empty()
    }

    /// Human-readable title
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::LabReport => "Lab Report Summarizer",
            Self::Prescription => "Prescription Analyzer",
            Self::Diagnosis => "AI Disease Diagnoser",
        }
    }

    /// Stable identifier used in logs and APIs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LabReport => "lab-report",
            Self::Prescription => "prescription",
            Self::Diagnosis => "diagnosis",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoteVision => write!(f, "remote-vision"),
            Self::LocalModel => write!(f, "local-model"),
        }
    }
}
