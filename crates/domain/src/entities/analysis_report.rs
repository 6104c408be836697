//! Formatted output handed back to the presentation layer

use serde::Serialize;
use std::fmt;

use crate::value_objects::TaskKind;

/// Display-ready model output
///
/// Contains HTML emphasis and line breaks. Model text is not escaped, so the
/// content must only be rendered where that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormattedDiagnosis(String);

impl FormattedDiagnosis {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_html(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FormattedDiagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one entry-point call
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Task that produced this report
    pub task: TaskKind,
    /// Formatted backend output
    pub formatted: FormattedDiagnosis,
    /// Model that generated the output
    pub model: String,
    /// Backend latency in milliseconds
    pub latency_ms: u64,
}
