//! Analysis tasks and the prompts built for them

use std::fmt;

use crate::{entities::SymptomRecord, value_objects::TaskKind};

/// A requested analysis together with its user input
///
/// Image tasks carry no prompt-relevant payload; the image travels
/// separately as an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    LabReport,
    Prescription,
    Diagnosis(SymptomRecord),
}

impl Task {
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        match self {
            Self::LabReport => TaskKind::LabReport,
            Self::Prescription => TaskKind::Prescription,
            Self::Diagnosis(_) => TaskKind::Diagnosis,
        }
    }
}

/// Instruction text sent to a backend
///
/// Built fresh per request and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPrompt {
    kind: TaskKind,
    text: String,
}

impl TaskPrompt {
    pub fn new(kind: TaskKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for TaskPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_kind_follows_variant() {
        assert_eq!(Task::LabReport.kind(), TaskKind::LabReport);
        assert_eq!(Task::Prescription.kind(), TaskKind::Prescription);
        let record = SymptomRecord::new(20, "Male", "cough").unwrap();
        assert_eq!(Task::Diagnosis(record).kind(), TaskKind::Diagnosis);
    }

    #[test]
    fn prompt_exposes_text() {
        let prompt = TaskPrompt::new(TaskKind::LabReport, "Summarize");
        assert_eq!(prompt.as_str(), "Summarize");
        assert_eq!(prompt.to_string(), "Summarize");
        assert_eq!(prompt.kind(), TaskKind::LabReport);
    }
}
