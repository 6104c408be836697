//! An uploaded file held on disk for the duration of one inference call

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::value_objects::MediaType;

/// A stored upload, owned by exactly one in-flight request
///
/// Not `Clone`: the request that stored the artifact is the only one that may
/// read or release it.
#[derive(Debug, PartialEq, Eq)]
pub struct TransientArtifact {
    path: PathBuf,
    source_name: String,
    media_type: MediaType,
    size_bytes: u64,
}

impl TransientArtifact {
    pub fn new(
        path: impl Into<PathBuf>,
        source_name: impl Into<String>,
        media_type: MediaType,
        size_bytes: u64,
    ) -> Self {
        Self {
            path: path.into(),
            source_name: source_name.into(),
            media_type,
            size_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name the file was uploaded under
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub const fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// Outcome of releasing a transient artifact
///
/// Release never fails the request: a failed deletion is reported and the
/// orphaned file is left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ReleaseStatus {
    /// The file was removed
    Deleted,
    /// There was nothing to remove
    AlreadyAbsent,
    /// Removal failed; the file may still exist
    Failed(String),
}

impl ReleaseStatus {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => write!(f, "deleted"),
            Self::AlreadyAbsent => write!(f, "already absent"),
            Self::Failed(reason) => write!(f, "deletion failed: {reason}"),
        }
    }
}
