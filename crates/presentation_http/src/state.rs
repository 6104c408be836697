//! Application state shared across handlers

use std::sync::Arc;

use application::{HealthService, MedicalAssistantService};
use infrastructure::Services;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Runs the three analyses
    pub assistant: Arc<MedicalAssistantService>,
    /// Backend readiness checks
    pub health: HealthService,
}

impl From<Services> for AppState {
    fn from(services: Services) -> Self {
        Self {
            assistant: services.assistant,
            health: services.health,
        }
    }
}
