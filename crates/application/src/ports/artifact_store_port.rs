//! Artifact store port - temporary files backing one inference call

use async_trait::async_trait;
use domain::{ReleaseStatus, TransientArtifact, UploadedFile};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the temporary storage of uploaded files
///
/// Each stored artifact belongs to exactly one request and must be handed
/// back to [`release`](Self::release) exactly once.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Persist an upload, failing with [`ApplicationError::Io`] if the write fails
    async fn store(&self, upload: &UploadedFile) -> Result<TransientArtifact, ApplicationError>;

    /// Read a stored artifact back
    async fn read(&self, artifact: &TransientArtifact) -> Result<Vec<u8>, ApplicationError>;

    /// Remove a stored artifact
    ///
    /// Never fails: the outcome is reported in the returned status.
    async fn release(&self, artifact: TransientArtifact) -> ReleaseStatus;
}
