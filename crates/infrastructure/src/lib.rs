//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the two inference
//! backends, the filesystem artifact store and log-based progress. Also
//! owns configuration loading, telemetry setup and service wiring.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{Services, build_services};
pub use config::{
    AppConfig, LogFormat, ServerConfig, StorageConfig, TelemetryAppConfig, VisionAppConfig,
};
pub use telemetry::{TelemetryError, init_telemetry};
