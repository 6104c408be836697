//! Health aggregation service
//!
//! Checks every registered inference backend with a per-backend timeout and
//! reports their individual status.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::BackendRegistry;
use crate::ports::InferenceBackend;

/// Default global timeout for health checks in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Configuration for health check behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Global timeout for all health checks in seconds (default: 5)
    #[serde(default = "default_global_timeout")]
    pub global_timeout_secs: u64,

    /// Backend-specific timeout overrides in seconds, keyed by backend kind
    #[serde(default)]
    pub service_timeouts: HashMap<String, u64>,
}

const fn default_global_timeout() -> u64 {
    DEFAULT_HEALTH_CHECK_TIMEOUT_SECS
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            global_timeout_secs: default_global_timeout(),
            service_timeouts: HashMap::new(),
        }
    }
}

impl HealthConfig {
    /// Get the timeout for a specific service
    #[must_use]
    pub fn timeout_for_service(&self, service: &str) -> Duration {
        let secs = self
            .service_timeouts
            .get(service)
            .copied()
            .unwrap_or(self.global_timeout_secs);
        Duration::from_secs(secs)
    }
}

/// Status of an individual backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub healthy: bool,
    /// Model the backend serves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// Create a healthy status with additional info
    #[must_use]
    pub fn healthy_with_info(info: impl Into<String>) -> Self {
        Self {
            healthy: true,
            info: Some(info.into()),
            response_time_ms: None,
            error: None,
        }
    }

    /// Create an unhealthy status
    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            info: None,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    /// Create an unhealthy status due to timeout
    #[must_use]
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }

    /// Add response time to the status
    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Health report for all backends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True if every backend is healthy
    pub healthy: bool,
    pub services: HashMap<String, ServiceHealth>,
}

impl HealthReport {
    #[must_use]
    pub fn new(services: HashMap<String, ServiceHealth>) -> Self {
        let healthy = !services.is_empty() && services.values().all(|s| s.healthy);
        Self { healthy, services }
    }

    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Service for aggregating backend health checks
#[derive(Debug, Clone)]
pub struct HealthService {
    config: HealthConfig,
    backends: BackendRegistry,
}

impl HealthService {
    #[must_use]
    pub fn new(backends: BackendRegistry) -> Self {
        Self {
            config: HealthConfig::default(),
            backends,
        }
    }

    /// Set the health check configuration
    #[must_use]
    pub fn with_config(mut self, config: HealthConfig) -> Self {
        self.config = config;
        self
    }

    /// Check health of all registered backends
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let mut services = HashMap::new();
        for (kind, backend) in self.backends.iter() {
            let name = kind.to_string();
            let status = self.check_backend(&name, backend.as_ref()).await;
            services.insert(name, status);
        }
        HealthReport::new(services)
    }

    async fn check_backend(&self, name: &str, backend: &dyn InferenceBackend) -> ServiceHealth {
        let timeout_duration = self.config.timeout_for_service(name);
        let start = Instant::now();

        let Ok(healthy) = timeout(timeout_duration, backend.is_healthy()).await else {
            warn!(backend = name, "Health check timed out");
            return ServiceHealth::timeout();
        };

        let response_time = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        if healthy {
            let model = backend.model_name();
            debug!(backend = name, model = %model, response_time_ms = response_time, "Backend healthy");
            ServiceHealth::healthy_with_info(model).with_response_time(response_time)
        } else {
            warn!(backend = name, response_time_ms = response_time, "Backend unhealthy");
            ServiceHealth::unhealthy(format!("{name} backend reports unhealthy"))
                .with_response_time(response_time)
        }
    }
}
