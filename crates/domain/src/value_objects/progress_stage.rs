//! Advisory progress stages shown while a diagnosis is generated
//!
//! These are user feedback only. The local model exposes no intermediate
//! progress, so a stage says nothing about how far generation has come.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered status messages for a diagnosis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStage {
    Gathering,
    Analyzing,
    Diagnosing,
    Finalizing,
    Ready,
}

impl ProgressStage {
    /// Stages in display order
    pub const SEQUENCE: [Self; 5] = [
        Self::Gathering,
        Self::Analyzing,
        Self::Diagnosing,
        Self::Finalizing,
        Self::Ready,
    ];

    /// Status message
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Gathering => "Gathering symptoms...",
            Self::Analyzing => "Analyzing data...",
            Self::Diagnosing => "Diagnosing...",
            Self::Finalizing => "Finalizing results...",
            Self::Ready => "Diagnosis ready!",
        }
    }

    /// Icon shown next to the message
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Gathering => "🔍",
            Self::Analyzing => "🧠",
            Self::Diagnosing => "⚡",
            Self::Finalizing => "🔬",
            Self::Ready => "🩺",
        }
    }

    /// The stage after this one, if any
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Gathering => Some(Self::Analyzing),
            Self::Analyzing => Some(Self::Diagnosing),
            Self::Diagnosing => Some(Self::Finalizing),
            Self::Finalizing => Some(Self::Ready),
            Self::Ready => None,
        }
    }
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.message())
    }
}
