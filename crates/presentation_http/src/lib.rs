//! MedAssist HTTP presentation layer
//!
//! Exposes the three analyses over HTTP: multipart uploads for lab reports
//! and prescriptions, JSON for symptom records, plus liveness and readiness
//! probes.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
