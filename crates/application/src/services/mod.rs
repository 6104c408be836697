//! Application services - Use case implementations

mod artifact_guard;
mod backend_registry;
mod health_service;
mod medical_assistant_service;
mod prompt_builder;
mod response_formatter;

pub use backend_registry::BackendRegistry;
pub use health_service::{HealthConfig, HealthReport, HealthService, ServiceHealth};
pub use medical_assistant_service::MedicalAssistantService;
pub use prompt_builder::{PromptBuilder, RESPONSE_MARKER};
pub use response_formatter::ResponseFormatter;
