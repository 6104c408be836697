//! Application layer - Use cases and orchestration
//!
//! Defines the ports the core needs (inference backends, artifact storage,
//! progress reporting) and the services that turn a user request into a
//! formatted analysis: prompt building, backend dispatch, response
//! formatting and the temporary-file lifecycle around each call.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
