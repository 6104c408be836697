//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to inference server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to inference server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Credential rejected by the remote service
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Model not found or could not be loaded
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed or carried no usable content
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded the configured timeout
    #[error("Inference timed out")]
    Timeout,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            InferenceError::Unauthorized("bad key".to_string()).to_string(),
            "Unauthorized: bad key"
        );
        assert_eq!(InferenceError::Timeout.to_string(), "Inference timed out");
        assert_eq!(
            InferenceError::ModelNotAvailable("m".to_string()).to_string(),
            "Model not available: m"
        );
    }
}
