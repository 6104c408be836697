//! Scoped ownership of a stored artifact
//!
//! The guard holds the artifact for the lifetime of one request. Releasing it
//! explicitly reports the outcome. Dropping it while still armed (the request
//! future was cancelled) schedules the release on the current runtime.

use std::sync::Arc;

use domain::{ReleaseStatus, TransientArtifact};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::ports::ArtifactStorePort;

pub(crate) struct ArtifactGuard {
    store: Arc<dyn ArtifactStorePort>,
    artifact: Option<TransientArtifact>,
}

impl ArtifactGuard {
    pub(crate) fn new(store: Arc<dyn ArtifactStorePort>, artifact: TransientArtifact) -> Self {
        Self {
            store,
            artifact: Some(artifact),
        }
    }

    pub(crate) fn artifact(&self) -> Option<&TransientArtifact> {
        self.artifact.as_ref()
    }

    /// Release the artifact and disarm the guard
    pub(crate) async fn release(mut self) -> ReleaseStatus {
        match self.artifact.take() {
            Some(artifact) => self.store.release(artifact).await,
            None => ReleaseStatus::AlreadyAbsent,
        }
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        let Some(artifact) = self.artifact.take() else {
            return;
        };

        let path = artifact.path().display().to_string();
        match Handle::try_current() {
            Ok(handle) => {
                let store = Arc::clone(&self.store);
                debug!(path = %path, "Request cancelled, releasing artifact in background");
                handle.spawn(async move {
                    let status = store.release(artifact).await;
                    if status.is_failed() {
                        warn!(%status, "Temporary file left behind after cancellation");
                    }
                });
            },
            Err(_) => warn!(path = %path, "No runtime to release artifact, file left behind"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use async_trait::async_trait;
    use domain::{MediaType, UploadedFile};

    use super::*;
    use crate::error::ApplicationError;

    #[derive(Default)]
    struct RecordingStore {
        released: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ArtifactStorePort for RecordingStore {
        async fn store(
            &self,
            _upload: &UploadedFile,
        ) -> Result<TransientArtifact, ApplicationError> {
            unreachable!("guard tests never store")
        }

        async fn read(&self, _artifact: &TransientArtifact) -> Result<Vec<u8>, ApplicationError> {
            unreachable!("guard tests never read")
        }

        async fn release(&self, artifact: TransientArtifact) -> ReleaseStatus {
            self.released
                .lock()
                .unwrap()
                .push(artifact.source_name().to_string());
            ReleaseStatus::Deleted
        }
    }

    fn artifact(name: &str) -> TransientArtifact {
        TransientArtifact::new(format!("/work/{name}"), name, MediaType::Png, 4)
    }

    #[tokio::test]
    async fn explicit_release_runs_once() {
        let store = Arc::new(RecordingStore::default());
        let guard = ArtifactGuard::new(store.clone(), artifact("a.png"));
        assert_eq!(guard.release().await, ReleaseStatus::Deleted);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(*store.released.lock().unwrap(), vec!["a.png".to_string()]);
    }

    #[tokio::test]
    async fn dropped_guard_releases_in_background() {
        let store = Arc::new(RecordingStore::default());
        drop(ArtifactGuard::new(store.clone(), artifact("b.png")));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(*store.released.lock().unwrap(), vec!["b.png".to_string()]);
    }
}
