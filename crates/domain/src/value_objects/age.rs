//! Patient age value object
//!
//! Represents a validated patient age in whole years (5-100).
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Age;
//!
//! let age = Age::new(34).expect("valid age");
//! assert_eq!(age.years(), 34);
//!
//! // Ages outside the supported range are rejected
//! assert!(Age::new(4).is_err());
//! assert!(Age::new(101).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when an age is outside the supported range
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid age: {0} is out of range (must be 5-100)")]
pub struct InvalidAge(i64);

impl InvalidAge {
    /// The rejected value
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// Patient age in years, always within `Age::MIN..=Age::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Age(u8);

impl Age {
    /// Youngest supported patient age
    pub const MIN: u8 = 5;
    /// Oldest supported patient age
    pub const MAX: u8 = 100;

    /// Create a new validated age
    ///
    /// Accepts a signed value so that negative input coming from forms or
    /// JSON is reported as an out-of-range age rather than a parse failure.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAge` if the value is below 5 or above 100.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn new(years: i64) -> Result<Self, InvalidAge> {
        if years < Self::MIN as i64 || years > Self::MAX as i64 {
            Err(InvalidAge(years))
        } else {
            Ok(Self(years as u8))
        }
    }

    /// Get the age in years
    #[must_use]
    pub const fn years(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Age {
    type Error = InvalidAge;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl<'de> Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
