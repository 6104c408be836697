//! Domain layer for MedAssist
//!
//! Contains the validated inputs (symptom records, uploads), the task kinds
//! and their routing tables, and the result types of an analysis.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
