//! API error handling
//!
//! Every error body is `{error, code}`. The `error` text is the message shown
//! to the user; backend or I/O details only go to the log.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Backend answered in a shape that could not be formatted
    #[error("Unprocessable response: {0}")]
    Unprocessable(String),

    /// Backend failed or was unreachable
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Message for the user
    pub error: String,
    /// Machine-readable error code
    pub code: String,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "validation_error",
            Self::Unprocessable(_) => "format_error",
            Self::BadGateway(_) => "backend_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();
        let message = match self {
            Self::BadRequest(msg)
            | Self::Unprocessable(msg)
            | Self::BadGateway(msg)
            | Self::Internal(msg) => msg,
        };

        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let message = err.user_message();
        match err {
            ApplicationError::Domain(_) => Self::BadRequest(message),
            ApplicationError::Format(detail) => {
                warn!(detail = %detail, "Backend output could not be formatted");
                Self::Unprocessable(message)
            },
            ApplicationError::Backend(detail) => {
                warn!(detail = %detail, "Backend call failed");
                Self::BadGateway(message)
            },
            ApplicationError::Io(detail)
            | ApplicationError::Configuration(detail)
            | ApplicationError::Internal(detail) => {
                error!(detail = %detail, "Request failed");
                Self::Internal(message)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err: ApiError =
            ApplicationError::Domain(DomainError::InvalidGender("robot".to_string())).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "validation_error");
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg.starts_with("Validation Error:")));
    }

    #[test]
    fn format_maps_to_fallback_message() {
        let err: ApiError = ApplicationError::Format("no marker in raw text".to_string()).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            matches!(err, ApiError::Unprocessable(ref msg) if msg == "Unable to process the response.")
        );
    }

    #[test]
    fn backend_maps_to_bad_gateway() {
        let err: ApiError = ApplicationError::Backend("local-model: timed out".to_string()).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "backend_error");
    }

    #[test]
    fn io_hides_details() {
        let err: ApiError =
            ApplicationError::Io("failed to write /var/tmp/x-cbc.png".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ApiError::Internal(ref msg) if !msg.contains("/var/tmp")));
    }

    #[test]
    fn configuration_maps_to_internal() {
        let err: ApiError = ApplicationError::Configuration("no key".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn into_response_status() {
        let response = ApiError::BadGateway("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            error: "Unable to process the response.".to_string(),
            code: "format_error".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(
            json,
            r#"{"error":"Unable to process the response.","code":"format_error"}"#
        );
    }
}
