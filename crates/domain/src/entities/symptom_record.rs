//! Symptom record submitted for diagnosis
//!
//! A `SymptomRecord` can only be obtained through validation, so holding one
//! is proof that age, gender and symptoms passed their constraints.
//!
//! # Examples
//!
//! ```
//! use domain::{Gender, SymptomRecord};
//!
//! let record = SymptomRecord::new(34, "Male", "fever, cough").unwrap();
//! assert_eq!(record.age().years(), 34);
//! assert_eq!(record.gender(), Gender::Male);
//! assert_eq!(record.symptoms(), "fever, cough");
//!
//! assert!(SymptomRecord::new(3, "Male", "fever").is_err());
//! assert!(SymptomRecord::new(34, "robot", "fever").is_err());
//! assert!(SymptomRecord::new(34, "Female", "   ").is_err());
//! ```

use serde::Serialize;
use validator::Validate;

use crate::{
    errors::DomainError,
    value_objects::{Age, Gender},
};

/// Maximum accepted length of the symptom description, in characters
pub const MAX_SYMPTOMS_CHARS: u64 = 4000;

/// A validated patient symptom description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct SymptomRecord {
    age: Age,
    gender: Gender,
    #[validate(length(min = 1, max = MAX_SYMPTOMS_CHARS))]
    symptoms: String,
}

impl SymptomRecord {
    /// Validate raw form input into a record
    ///
    /// Symptoms are trimmed before validation.
    pub fn new(age: i64, gender: &str, symptoms: impl Into<String>) -> Result<Self, DomainError> {
        let age = Age::new(age)?;
        let gender = gender.parse::<Gender>()?;
        Self::from_parts(age, gender, symptoms)
    }

    /// Build a record from already-typed age and gender
    pub fn from_parts(
        age: Age,
        gender: Gender,
        symptoms: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let candidate = Self {
            age,
            gender,
            symptoms: symptoms.into().trim().to_string(),
        };

        if candidate.symptoms.is_empty() {
            return Err(DomainError::InvalidSymptoms(
                "symptom description must not be empty".to_string(),
            ));
        }
        candidate.validate().map_err(|_| {
            DomainError::InvalidSymptoms(format!(
                "symptom description must be at most {MAX_SYMPTOMS_CHARS} characters"
            ))
        })?;

        Ok(candidate)
    }

    pub const fn age(&self) -> Age {
        self.age
    }

    pub const fn gender(&self) -> Gender {
        self.gender
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }
}
