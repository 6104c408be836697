//! Domain-level errors

use thiserror::Error;

use crate::value_objects::{InvalidAge, TaskKind};

/// Errors that can occur in the domain layer
///
/// Every variant is a validation failure: it is raised before any artifact
/// is stored or any backend is contacted.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Age outside the supported range
    #[error(transparent)]
    InvalidAge(#[from] InvalidAge),

    /// Gender not in the accepted set
    #[error("Invalid gender: {0:?} (expected Male, Female or Other)")]
    InvalidGender(String),

    /// Symptom description missing or too long
    #[error("Invalid symptoms: {0}")]
    InvalidSymptoms(String),

    /// Upload type not accepted for the requested task
    #[error("Unsupported file type {media} for {task}")]
    UnsupportedMediaType { task: TaskKind, media: String },

    /// Upload type could not be recognized at all
    #[error("Unrecognized file type: {0}")]
    UnrecognizedMediaType(String),

    /// Upload carried no content
    #[error("Uploaded file is empty: {0}")]
    EmptyUpload(String),

    /// Upload name unusable as a file name
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an unsupported media type error
    pub fn unsupported_media(task: TaskKind, media: impl Into<String>) -> Self {
        Self::UnsupportedMediaType {
            task,
            media: media.into(),
        }
    }
}
