//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Text shown whenever a backend response cannot be interpreted
pub const FALLBACK_MESSAGE: &str = "Unable to process the response.";

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input rejected before any artifact was stored or backend contacted
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Temporary artifact could not be written or read
    #[error("I/O error: {0}")]
    Io(String),

    /// Inference backend failed or returned nothing usable
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend output lacked the expected structure
    #[error("Format error: {0}")]
    Format(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl ApplicationError {
    /// Message suitable for display to the person who made the request
    ///
    /// Raw backend output never appears here.
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => format!("Validation Error: {e}"),
            Self::Io(_) => "The uploaded file could not be processed.".to_string(),
            Self::Backend(reason) => format!("Error generating response: {reason}"),
            Self::Format(_) => FALLBACK_MESSAGE.to_string(),
            Self::Configuration(_) | Self::Internal(_) => {
                "An internal error occurred.".to_string()
            },
        }
    }

    /// Stable machine-readable code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Domain(_) => "validation_error",
            Self::Io(_) => "io_error",
            Self::Backend(_) => "backend_error",
            Self::Format(_) => "format_error",
            Self::Configuration(_) => "configuration_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the request was rejected during validation
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_never_leaks_output() {
        let err = ApplicationError::Format("raw model output without marker".to_string());
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
        assert_eq!(err.code(), "format_error");
    }

    #[test]
    fn domain_errors_are_validation() {
        let err: ApplicationError = DomainError::InvalidGender("robot".to_string()).into();
        assert!(err.is_validation());
        assert!(err.user_message().starts_with("Validation Error: "));
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ApplicationError = io.into();
        assert!(matches!(err, ApplicationError::Io(ref msg) if msg.contains("read-only")));
        assert!(!err.user_message().contains("read-only"));
    }

    #[test]
    fn backend_message_includes_reason() {
        let err = ApplicationError::Backend("Unauthorized: Status 403".to_string());
        assert_eq!(
            err.user_message(),
            "Error generating response: Unauthorized: Status 403"
        );
        assert!(!err.is_validation());
    }
}
